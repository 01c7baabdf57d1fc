//! Error signal for hidden layers during backpropagation.
//!
//! The outer layer's error signal comes straight from the target vector.
//! Hidden layers derive theirs from the deltas of the layer after them, and
//! the way weights are paired with those deltas is selectable here.

use serde::{Deserialize, Serialize};

use super::layer::Layer;
use crate::core::{Error, Result};

/// How a hidden neuron combines the next layer's deltas into its error signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiddenErrorRule {
    /// Neuron `i` uses the weights that connect it to the next layer:
    /// `signal_i = sum_j next[j].weights[i] * delta_j`.
    ///
    /// `next` has already been updated when this runs.
    #[default]
    Transposed,

    /// Neuron `i` scales every delta by its own weight `i`:
    /// `signal_i = sum_j own_weights[i] * delta_j`.
    ///
    /// Needs every hidden layer to be no wider than its input.
    Positional,
}

impl HiddenErrorRule {
    /// Error signals for every neuron of `layer`, given the `next` layer and
    /// the per-neuron deltas it produced.
    pub fn signals(self, layer: &Layer, next: &Layer, next_deltas: &[f64]) -> Result<Vec<f64>> {
        self.check(layer, next)?;
        Ok(match self {
            HiddenErrorRule::Transposed => transposed_signals(layer, next, next_deltas),
            HiddenErrorRule::Positional => positional_signals(layer, next_deltas),
        })
    }

    /// Whether this rule can propagate from `next` back into `layer`.
    pub fn check(self, layer: &Layer, next: &Layer) -> Result<()> {
        match self {
            HiddenErrorRule::Transposed if !next.is_empty() && next.input_size() != layer.len() => {
                Err(Error::shape(
                    "transposed hidden error weights",
                    layer.len(),
                    next.input_size(),
                ))
            }
            HiddenErrorRule::Positional if layer.len() > layer.input_size() => Err(Error::shape(
                "positional hidden error weight index",
                layer.len(),
                layer.input_size(),
            )),
            _ => Ok(()),
        }
    }
}

fn positional_signals(layer: &Layer, next_deltas: &[f64]) -> Vec<f64> {
    layer
        .neurons()
        .iter()
        .enumerate()
        .map(|(i, neuron)| {
            let w = neuron.weights()[i];
            next_deltas.iter().map(|d| w * d).sum::<f64>()
        })
        .collect()
}

fn transposed_signals(layer: &Layer, next: &Layer, next_deltas: &[f64]) -> Vec<f64> {
    (0..layer.len())
        .map(|i| {
            next.neurons()
                .iter()
                .zip(next_deltas)
                .map(|(n, d)| n.weights()[i] * d)
                .sum::<f64>()
        })
        .collect()
}
