//! Crate-wide error type.
//!
//! Every failure here is a local invariant violation (bad move, bad shape,
//! empty network) or an I/O problem at the persistence boundary. Nothing is
//! retried by the caller; randomized components retry internally up to a cap
//! and surface `RetryExhausted` when it is reached.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// Coordinates outside the 3x3 grid.
    OutOfRange,
    /// Target cell already holds a symbol.
    Occupied,
    /// The game has already been won or drawn.
    GameOver,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMoveReason::OutOfRange => "out of range",
            IllegalMoveReason::Occupied => "cell occupied",
            IllegalMoveReason::GameOver => "game already finished",
        };
        f.write_str(text)
    }
}

/// Errors produced by the engine, the game and the persistence helpers.
#[derive(Debug)]
pub enum Error {
    /// A move targeted an invalid cell or a finished game.
    IllegalMove {
        x: usize,
        y: usize,
        reason: IllegalMoveReason,
    },

    /// Vector lengths disagree (weights vs. inputs, expected vs. outputs,
    /// or inconsistent dimensions in loaded weight data).
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// The network cannot be used as configured (e.g. it has no layers).
    Configuration(String),

    /// A move was requested on a board with no empty cell.
    NoLegalMove,

    /// A randomized generator hit its retry cap.
    RetryExhausted { what: &'static str, attempts: usize },

    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(bincode::Error),
}

impl Error {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IllegalMove { x, y, reason } => {
                write!(f, "illegal move at ({}, {}): {}", x, y, reason)
            }
            Error::ShapeMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "shape mismatch in {}: expected {}, got {}",
                context, expected, actual
            ),
            Error::Configuration(msg) => write!(f, "configuration error: {}", msg),
            Error::NoLegalMove => f.write_str("no legal move available"),
            Error::RetryExhausted { what, attempts } => {
                write!(f, "{} gave up after {} attempts", what, attempts)
            }
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Bincode(e) => write!(f, "bincode error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Bincode(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Bincode(e)
    }
}
