//! Tic-tac-toe rules: cells, players, outcomes and the board state machine.

pub mod board;
pub mod cell;

pub use board::{coords_to_index, index_to_coords, Board, Moves, SIZE};
pub use cell::{Cell, Outcome, Player};
