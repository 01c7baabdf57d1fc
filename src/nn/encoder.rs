//! Board encoding for network input.
//!
//! Transforms a board into the flat numeric vector the network reads.

use serde::{Deserialize, Serialize};

use crate::core::BOARD_CELLS;
use crate::game::{Board, Cell};

/// Encodes boards into network input vectors.
pub trait BoardEncoder: Send + Sync {
    /// Encode the board, row-major.
    fn encode(&self, board: &Board) -> Vec<f64>;

    /// Length of every encoded vector.
    fn input_size(&self) -> usize {
        BOARD_CELLS
    }
}

/// Maps each cell symbol to a fixed number.
///
/// Defaults: Naught `+1`, Cross `-1`, Empty `0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolEncoder {
    pub naught: f64,
    pub cross: f64,
    pub empty: f64,
}

impl Default for SymbolEncoder {
    fn default() -> Self {
        Self {
            naught: 1.0,
            cross: -1.0,
            empty: 0.0,
        }
    }
}

impl SymbolEncoder {
    pub fn new(naught: f64, cross: f64, empty: f64) -> Self {
        Self {
            naught,
            cross,
            empty,
        }
    }

    /// Value of a single cell.
    #[must_use]
    pub fn cell_value(&self, cell: Cell) -> f64 {
        match cell {
            Cell::Naught => self.naught,
            Cell::Cross => self.cross,
            Cell::Empty => self.empty,
        }
    }

    /// Encode a flat row-major sequence of cells.
    pub fn encode_cells<'a>(&self, cells: impl IntoIterator<Item = &'a Cell>) -> Vec<f64> {
        cells.into_iter().map(|&c| self.cell_value(c)).collect()
    }
}

impl BoardEncoder for SymbolEncoder {
    fn encode(&self, board: &Board) -> Vec<f64> {
        self.encode_cells(board.cells().iter().flatten())
    }
}
