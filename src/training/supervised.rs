//! Supervised training passes over an example set.
//!
//! Backpropagation reports nothing about convergence, so each epoch is
//! followed by a forward-only error measurement for logging.

use tracing::{info, instrument};

use super::example::Example;
use crate::core::{Error, Result, DEFAULT_LEARNING_RATE};
use crate::nn::NeuralNetwork;

/// Settings for [`train`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    /// Learning rate passed to `back_prop`.
    pub learning_rate: f64,

    /// Passes over the example set.
    pub epochs: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: 1,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    #[must_use]
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }
}

/// Mean squared error of the network over `examples`. Does not train.
pub fn mean_squared_error(network: &NeuralNetwork, examples: &[Example]) -> Result<f64> {
    if examples.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    let mut count = 0usize;
    for example in examples {
        let outputs = network.predict(&example.input)?;
        if outputs.len() != example.expected.len() {
            return Err(Error::shape(
                "expected output",
                outputs.len(),
                example.expected.len(),
            ));
        }
        total += outputs
            .iter()
            .zip(&example.expected)
            .map(|(o, e)| (e - o) * (e - o))
            .sum::<f64>();
        count += outputs.len();
    }
    Ok(if count == 0 { 0.0 } else { total / count as f64 })
}

/// Run `config.epochs` backpropagation passes. Returns the final error.
#[instrument(skip(network, examples), fields(examples = examples.len()))]
pub fn train(network: &mut NeuralNetwork, examples: &[Example], config: &TrainConfig) -> Result<f64> {
    let mut error = mean_squared_error(network, examples)?;
    info!(epoch = 0, mse = error, "training start");

    for epoch in 1..=config.epochs {
        network.back_prop(examples, config.learning_rate)?;
        error = mean_squared_error(network, examples)?;
        info!(epoch, mse = error, "epoch complete");
    }
    Ok(error)
}
