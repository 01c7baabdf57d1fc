//! The learning engine.
//!
//! ## Overview
//!
//! - **Neuron**: weight vector plus alpha, sigmoid activation, in-place update
//! - **Layer**: neurons sharing one input vector
//! - **NeuralNetwork**: forward inference and backpropagation
//! - **HiddenErrorRule**: how hidden layers derive their error signal
//! - **Encoding**: `BoardEncoder` trait and `SymbolEncoder`
//! - **Persistence**: JSON weight files and bincode snapshots
//!
//! ## Usage
//!
//! ```
//! use ttt_nn::core::{NetworkConfig, SeededRng};
//! use ttt_nn::game::Board;
//! use ttt_nn::nn::{BoardEncoder, SymbolEncoder};
//!
//! let mut rng = SeededRng::new(42);
//! let network = NetworkConfig::default().build(&mut rng);
//!
//! let input = SymbolEncoder::default().encode(&Board::new());
//! let scores = network.predict(&input).unwrap();
//! assert_eq!(scores.len(), 9);
//! ```

pub mod encoder;
pub mod layer;
pub mod network;
pub mod neuron;
pub mod propagation;
pub mod weights;

pub use encoder::{BoardEncoder, SymbolEncoder};
pub use layer::Layer;
pub use network::NeuralNetwork;
pub use neuron::{sigmoid, sigmoid_prime, Neuron};
pub use propagation::HiddenErrorRule;
pub use weights::WeightFile;
