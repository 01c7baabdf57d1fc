//! The 3x3 board state machine.
//!
//! `play` is the only way the grid changes: one Empty cell becomes the
//! mover's symbol, the turn flips, and the returned [`Outcome`] reflects the
//! new position. Once the outcome is terminal every further move fails.

use smallvec::SmallVec;
use std::fmt;

use super::cell::{Cell, Outcome, Player};
use crate::core::{Error, IllegalMoveReason, Result};

/// Side length of the grid.
pub const SIZE: usize = 3;

/// Legal move list; never longer than the board.
pub type Moves = SmallVec<[(usize, usize); SIZE * SIZE]>;

/// Row/column of a flat cell index, row-major.
#[must_use]
pub const fn index_to_coords(index: usize) -> (usize, usize) {
    let y = index % SIZE;
    let x = (index - y) / SIZE;
    (x, y)
}

/// Flat row-major index of a cell.
#[must_use]
pub const fn coords_to_index(x: usize, y: usize) -> usize {
    x * SIZE + y
}

/// A tic-tac-toe board with turn tracking and outcome detection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
    turn: Player,
    outcome: Outcome,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, Naught to move.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
            turn: Player::Naught,
            outcome: Outcome::InProgress,
        }
    }

    /// Build a board from a grid, deriving turn and outcome.
    ///
    /// Naught moves first, so the grid must hold as many naughts as crosses
    /// or exactly one more.
    pub fn from_cells(cells: [[Cell; SIZE]; SIZE]) -> Result<Self> {
        let count = |c: Cell| cells.iter().flatten().filter(|&&x| x == c).count();
        let naughts = count(Cell::Naught);
        let crosses = count(Cell::Cross);

        let turn = if naughts == crosses {
            Player::Naught
        } else if naughts == crosses + 1 {
            Player::Cross
        } else {
            return Err(Error::Configuration(format!(
                "{} naughts and {} crosses cannot occur in play",
                naughts, crosses
            )));
        };

        let mut board = Self {
            cells,
            turn,
            outcome: Outcome::InProgress,
        };
        board.outcome = board.evaluate();
        Ok(board)
    }

    /// Clear the grid for a new game.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Player to move next.
    #[must_use]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Contents of a cell. Out-of-range coordinates are an error.
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell> {
        self.cells
            .get(x)
            .and_then(|row| row.get(y))
            .copied()
            .ok_or(Error::IllegalMove {
                x,
                y,
                reason: IllegalMoveReason::OutOfRange,
            })
    }

    /// Whether `(x, y)` is Empty. Out-of-range coordinates are an error.
    pub fn legal(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.cell(x, y)?.is_empty())
    }

    /// Every Empty cell, row-major. Empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> Moves {
        if self.is_terminal() {
            return Moves::new();
        }
        (0..SIZE * SIZE)
            .map(index_to_coords)
            .filter(|&(x, y)| self.cells[x][y].is_empty())
            .collect()
    }

    /// Place the mover's symbol at `(x, y)` and return the new outcome.
    pub fn play(&mut self, x: usize, y: usize) -> Result<Outcome> {
        let illegal = |reason| Error::IllegalMove { x, y, reason };

        if self.is_terminal() {
            return Err(illegal(IllegalMoveReason::GameOver));
        }
        if !self.cell(x, y)?.is_empty() {
            return Err(illegal(IllegalMoveReason::Occupied));
        }

        self.cells[x][y] = self.turn.symbol();
        self.turn = self.turn.opponent();
        self.outcome = self.evaluate();
        Ok(self.outcome)
    }

    fn evaluate(&self) -> Outcome {
        if let Some(winner) = self.winner() {
            Outcome::Won(winner)
        } else if self.cells.iter().flatten().all(|c| !c.is_empty()) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// First completed line: rows, then columns, then the two diagonals.
    fn winner(&self) -> Option<Player> {
        let c = &self.cells;
        let line = |a: Cell, b: Cell, d: Cell| if a == b && b == d { a.owner() } else { None };

        (0..SIZE)
            .find_map(|r| line(c[r][0], c[r][1], c[r][2]))
            .or_else(|| (0..SIZE).find_map(|col| line(c[0][col], c[1][col], c[2][col])))
            .or_else(|| line(c[0][0], c[1][1], c[2][2]))
            .or_else(|| line(c[2][0], c[1][1], c[0][2]))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            writeln!(f, "{}|{}|{}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
