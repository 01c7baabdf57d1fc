//! Move policies.
//!
//! - `MoveSelector`: the network's greedy choice among Empty cells
//! - `OpponentPolicy`: how the other side moves; `RandomMover` samples uniformly
//! - `RandomBoardGenerator`: random non-terminal positions for example creation

pub mod random;
pub mod selector;

pub use random::{OpponentPolicy, RandomBoardGenerator, RandomMover, DEFAULT_MAX_ATTEMPTS};
pub use selector::MoveSelector;
