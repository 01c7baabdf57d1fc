//! Cell contents, players and game outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides. Naught always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Naught,
    Cross,
}

impl Player {
    /// The symbol this player writes on the board.
    #[must_use]
    pub const fn symbol(self) -> Cell {
        match self {
            Player::Naught => Cell::Naught,
            Player::Cross => Cell::Cross,
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::Naught => Player::Cross,
            Player::Cross => Player::Naught,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of one board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Naught,
    Cross,
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The player owning this cell, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Naught => Some(Player::Naught),
            Cell::Cross => Some(Player::Cross),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Cell::Empty => '-',
            Cell::Naught => 'O',
            Cell::Cross => 'X',
        };
        write!(f, "{}", c)
    }
}

/// State of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won(Player),
    Draw,
}

impl Outcome {
    /// Won or drawn: no further moves are legal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(p) => Some(p),
            _ => None,
        }
    }
}
