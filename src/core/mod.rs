//! Core building blocks: errors, seeded RNG and topology configuration.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{NetworkConfig, BOARD_CELLS, DEFAULT_ALPHA, DEFAULT_LEARNING_RATE};
pub use error::{Error, IllegalMoveReason, Result};
pub use rng::SeededRng;
