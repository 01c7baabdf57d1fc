//! # ttt-nn
//!
//! A small multilayer perceptron that learns to pick tic-tac-toe moves, and a
//! self-play harness that measures it against a random opponent.
//!
//! ## Design Principles
//!
//! 1. **Typed failures**: illegal moves, shape mismatches and empty networks
//!    are `Error` values, never panics.
//!
//! 2. **Reproducible**: every random draw (weight init, opponent moves,
//!    random positions) comes from a seeded `SeededRng`.
//!
//! 3. **Explicit state transitions**: `Board::play` returns the new outcome.
//!
//! ## Modules
//!
//! - `core`: errors, seeded RNG, network topology configuration
//! - `nn`: neurons, layers, the network, encoding, weight persistence
//! - `game`: cells, players, outcomes, the board
//! - `policy`: network move selection, random opponent, random positions
//! - `training`: examples, supervised training, self-play, history

pub mod core;
pub mod game;
pub mod nn;
pub mod policy;
pub mod training;

// Re-export commonly used types
pub use crate::core::{Error, NetworkConfig, Result, SeededRng};

pub use crate::game::{Board, Cell, Outcome, Player};

pub use crate::nn::{
    BoardEncoder, HiddenErrorRule, Layer, NeuralNetwork, Neuron, SymbolEncoder, WeightFile,
};

pub use crate::policy::{MoveSelector, OpponentPolicy, RandomBoardGenerator, RandomMover};

pub use crate::training::{
    EvaluationHistory, Example, SelfPlayConfig, SelfPlayHarness, SelfPlayReport, TrainConfig,
};
