//! Network-driven move selection.

use tracing::trace;

use crate::core::{Error, Result, BOARD_CELLS};
use crate::game::{index_to_coords, Board};
use crate::nn::{BoardEncoder, NeuralNetwork, SymbolEncoder};

/// Picks the network's highest-scoring Empty cell.
#[derive(Clone, Debug, Default)]
pub struct MoveSelector {
    encoder: SymbolEncoder,
}

impl MoveSelector {
    pub fn new(encoder: SymbolEncoder) -> Self {
        Self { encoder }
    }

    #[must_use]
    pub fn encoder(&self) -> &SymbolEncoder {
        &self.encoder
    }

    /// Best legal cell according to `network`, without playing it.
    ///
    /// Cells are scanned 0..9; a later cell replaces the current pick only
    /// with a strictly higher score, so ties go to the lowest index.
    pub fn best_move(&self, board: &Board, network: &NeuralNetwork) -> Result<(usize, usize)> {
        if board.is_terminal() {
            return Err(Error::NoLegalMove);
        }

        let scores = network.predict(&self.encoder.encode(board))?;
        if scores.len() < BOARD_CELLS {
            return Err(Error::shape("network output", BOARD_CELLS, scores.len()));
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, &score) in scores.iter().take(BOARD_CELLS).enumerate() {
            let (x, y) = index_to_coords(idx);
            if !board.legal(x, y)? {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }

        let (idx, score) = best.ok_or(Error::NoLegalMove)?;
        trace!(idx, score, "selected move");
        Ok(index_to_coords(idx))
    }

    /// Play the network's best legal cell and return it.
    pub fn choose_move(&self, board: &mut Board, network: &NeuralNetwork) -> Result<(usize, usize)> {
        let (x, y) = self.best_move(board, network)?;
        board.play(x, y)?;
        Ok((x, y))
    }
}
