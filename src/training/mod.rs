//! Training and evaluation.
//!
//! ## Overview
//!
//! - **Example**: `(input, expected)` pairs consumed by `back_prop`
//! - **train**: epochs of backpropagation with error logging
//! - **SelfPlayHarness**: games against a random opponent, tallied per side
//! - **EvaluationHistory**: percentages across evaluation runs
//!
//! ## Usage
//!
//! ```
//! use ttt_nn::core::{NetworkConfig, SeededRng};
//! use ttt_nn::policy::MoveSelector;
//! use ttt_nn::training::{SelfPlayConfig, SelfPlayHarness};
//!
//! let network = NetworkConfig::default().build(&mut SeededRng::new(1));
//! let harness = SelfPlayHarness::new(
//!     MoveSelector::default(),
//!     SelfPlayConfig::new().with_games(20),
//! );
//! let report = harness.run(&network).unwrap();
//! assert_eq!(report.wins + report.losses + report.draws, 20);
//! ```

pub mod example;
pub mod history;
pub mod self_play;
pub mod supervised;

pub use example::{load_examples, save_examples, Example};
pub use history::{EvaluationHistory, HistoryMeans};
pub use self_play::{SelfPlayConfig, SelfPlayHarness, SelfPlayReport};
pub use supervised::{mean_squared_error, train, TrainConfig};
