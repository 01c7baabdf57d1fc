//! A single sigmoid neuron.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Sigmoid with steepness `alpha`: `1 / (1 + e^(-alpha * x))`.
#[inline]
pub fn sigmoid(alpha: f64, x: f64) -> f64 {
    1.0 / (1.0 + (-alpha * x).exp())
}

/// Derivative of [`sigmoid`] expressed through its own value: `g(x) * (1 - g(x))`.
#[inline]
pub fn sigmoid_prime(alpha: f64, x: f64) -> f64 {
    let g = sigmoid(alpha, x);
    g * (1.0 - g)
}

/// A neuron holding one weight per input and its own alpha.
///
/// `alpha` sets the sigmoid steepness. The weighted sum from the most recent
/// call to [`Neuron::output`] is cached for the next weight update and is not
/// persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Neuron {
    weights: Vec<f64>,
    alpha: f64,
    #[serde(skip)]
    last_weighted_sum: f64,
}

impl PartialEq for Neuron {
    fn eq(&self, other: &Self) -> bool {
        self.weights == other.weights && self.alpha == other.alpha
    }
}

impl Neuron {
    /// Create a neuron with the given alpha and input weights.
    pub fn new(alpha: f64, weights: Vec<f64>) -> Self {
        Self {
            weights,
            alpha,
            last_weighted_sum: 0.0,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Number of inputs this neuron expects.
    #[must_use]
    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    /// Weighted sum cached by the last [`Neuron::output`] call.
    #[must_use]
    pub fn last_weighted_sum(&self) -> f64 {
        self.last_weighted_sum
    }

    /// Weighted sum of `inputs`, without touching the cache.
    pub fn weighted_sum(&self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.weights.len() {
            return Err(Error::shape(
                "neuron inputs",
                self.weights.len(),
                inputs.len(),
            ));
        }
        Ok(self.weights.iter().zip(inputs).map(|(w, i)| w * i).sum())
    }

    /// This neuron's sigmoid at `x`.
    #[must_use]
    pub fn activation(&self, x: f64) -> f64 {
        sigmoid(self.alpha, x)
    }

    /// This neuron's sigmoid derivative at `x`.
    #[must_use]
    pub fn activation_prime(&self, x: f64) -> f64 {
        sigmoid_prime(self.alpha, x)
    }

    /// Activated weighted sum of `inputs`. Caches the sum for the next update.
    pub fn output(&mut self, inputs: &[f64]) -> Result<f64> {
        let sum = self.weighted_sum(inputs)?;
        self.last_weighted_sum = sum;
        Ok(self.activation(sum))
    }

    /// Shift every weight by `learning_rate * err_signal * g'(cached sum)`.
    ///
    /// The same delta is applied to every weight; the upstream input is not
    /// multiplied in. Returns that delta (0.0 for a neuron with no weights).
    pub fn update_weights(&mut self, learning_rate: f64, err_signal: f64) -> f64 {
        if self.weights.is_empty() {
            return 0.0;
        }
        let delta = learning_rate * err_signal * self.activation_prime(self.last_weighted_sum);
        for weight in &mut self.weights {
            *weight += delta;
        }
        delta
    }
}
