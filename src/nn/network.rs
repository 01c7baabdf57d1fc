//! The multilayer perceptron: forward inference and backpropagation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::layer::Layer;
use super::neuron::Neuron;
use super::propagation::HiddenErrorRule;
use crate::core::{Error, Result, SeededRng};
use crate::training::Example;

/// An ordered stack of layers.
///
/// The first layer is treated as a pass-through input layer and is never
/// touched by [`NeuralNetwork::back_prop`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
    #[serde(default)]
    hidden_rule: HiddenErrorRule,
}

impl NeuralNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from nested weights and alphas.
    ///
    /// `weights[layer][neuron][input]` and `alphas[layer][neuron]` must line up,
    /// and every layer after the first must take as many inputs as the previous
    /// layer has neurons.
    pub fn from_weights(weights: Vec<Vec<Vec<f64>>>, alphas: Vec<Vec<f64>>) -> Result<Self> {
        if weights.len() != alphas.len() {
            return Err(Error::shape("network alpha layers", weights.len(), alphas.len()));
        }
        let layers = weights
            .into_iter()
            .zip(alphas)
            .map(|(w, a)| Layer::new(w, a))
            .collect::<Result<Vec<_>>>()?;

        let network = Self {
            layers,
            hidden_rule: HiddenErrorRule::default(),
        };
        network.validate()?;
        Ok(network)
    }

    /// Check that consecutive layers chain together and that the hidden
    /// error rule can train every hidden layer.
    pub fn validate(&self) -> Result<()> {
        for (idx, pair) in self.layers.windows(2).enumerate() {
            let (prev, layer) = (&pair[0], &pair[1]);
            if !layer.is_empty() && layer.input_size() != prev.len() {
                return Err(Error::shape(
                    format!("layer {} input width", idx + 1),
                    prev.len(),
                    layer.input_size(),
                ));
            }
        }
        let trained = self.layers.get(1..).unwrap_or(&[]);
        for pair in trained.windows(2) {
            self.hidden_rule.check(&pair[0], &pair[1])?;
        }
        Ok(())
    }

    /// Select how hidden layers compute their error signal.
    ///
    /// Fails when the rule cannot train this topology.
    pub fn with_hidden_rule(mut self, rule: HiddenErrorRule) -> Result<Self> {
        self.set_hidden_rule(rule)?;
        Ok(self)
    }

    /// In-place form of [`NeuralNetwork::with_hidden_rule`]. The rule is left
    /// unchanged on error.
    pub fn set_hidden_rule(&mut self, rule: HiddenErrorRule) -> Result<()> {
        let previous = std::mem::replace(&mut self.hidden_rule, rule);
        if let Err(e) = self.validate() {
            self.hidden_rule = previous;
            return Err(e);
        }
        Ok(())
    }

    #[must_use]
    pub fn hidden_rule(&self) -> HiddenErrorRule {
        self.hidden_rule
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Width of the expected input (first layer's input size).
    #[must_use]
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Width of the output (last layer's neuron count).
    #[must_use]
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::len)
    }

    /// Append a layer with weights drawn from `[-0.1, 0.1]`.
    pub fn new_layer(&mut self, nodes: usize, inputs: usize, alpha: f64, rng: &mut SeededRng) {
        self.layers.push(uniform_layer(nodes, inputs, alpha, 0.1, rng));
    }

    /// Append a layer with weights drawn from `[-1, 1]`.
    pub fn new_random_layer(&mut self, nodes: usize, inputs: usize, alpha: f64, rng: &mut SeededRng) {
        self.layers.push(uniform_layer(nodes, inputs, alpha, 1.0, rng));
    }

    /// Prepend a layer whose weights are all one.
    pub fn new_initial_layer(&mut self, nodes: usize, inputs: usize, alpha: f64) {
        let neurons = (0..nodes)
            .map(|_| Neuron::new(alpha, vec![1.0; inputs]))
            .collect();
        self.layers.insert(0, Layer::from_uniform(neurons));
    }

    fn ensure_layers(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::Configuration("network has no layers".into()));
        }
        Ok(())
    }

    /// Forward inference, caching each neuron's weighted sum.
    pub fn run(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.ensure_layers()?;
        let mut values = inputs.to_vec();
        for layer in &mut self.layers {
            values = layer.calc(&values)?;
        }
        Ok(values)
    }

    /// Forward inference without touching the cached sums.
    ///
    /// Produces the same values as [`NeuralNetwork::run`].
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.ensure_layers()?;
        let mut values = inputs.to_vec();
        for layer in &self.layers {
            values = layer
                .neurons()
                .iter()
                .map(|n| n.weighted_sum(&values).map(|s| n.activation(s)))
                .collect::<Result<Vec<_>>>()?;
        }
        Ok(values)
    }

    /// Supervised weight update over every example, in order.
    ///
    /// All layers except the first are updated, outermost first.
    #[instrument(level = "debug", skip(self, data), fields(examples = data.len()))]
    pub fn back_prop(&mut self, data: &[Example], learning_rate: f64) -> Result<()> {
        self.ensure_layers()?;
        for example in data {
            self.back_prop_example(example, learning_rate)?;
        }
        debug!(layers = self.layers.len(), "back_prop pass complete");
        Ok(())
    }

    fn back_prop_example(&mut self, example: &Example, learning_rate: f64) -> Result<()> {
        let outputs = self.run(&example.input)?;
        if example.expected.len() != outputs.len() {
            return Err(Error::shape(
                "expected output",
                outputs.len(),
                example.expected.len(),
            ));
        }

        let rule = self.hidden_rule;
        let Some((outer, hidden)) = self.layers[1..].split_last_mut() else {
            return Ok(());
        };

        let mut deltas = back_prop_outer(outer, &example.expected, &outputs, learning_rate);
        let mut next: &Layer = outer;
        for layer in hidden.iter_mut().rev() {
            let signals = rule.signals(layer, next, &deltas)?;
            deltas = layer
                .neurons_mut()
                .iter_mut()
                .zip(signals)
                .map(|(neuron, signal)| neuron.update_weights(learning_rate, signal))
                .collect();
            next = layer;
        }
        Ok(())
    }

    /// Overwrite every neuron's alpha.
    pub fn adapt_alpha(&mut self, alpha: f64) {
        for layer in &mut self.layers {
            for neuron in layer.neurons_mut() {
                neuron.set_alpha(alpha);
            }
        }
    }
}

/// Outer layer update: `signal_k = (expected_k - output_k) * g'(output_k)`.
fn back_prop_outer(layer: &mut Layer, expected: &[f64], outputs: &[f64], learning_rate: f64) -> Vec<f64> {
    layer
        .neurons_mut()
        .iter_mut()
        .zip(expected.iter().zip(outputs))
        .map(|(neuron, (&target, &output))| {
            let signal = (target - output) * neuron.activation_prime(output);
            neuron.update_weights(learning_rate, signal)
        })
        .collect()
}

fn uniform_layer(nodes: usize, inputs: usize, alpha: f64, bound: f64, rng: &mut SeededRng) -> Layer {
    let neurons = (0..nodes)
        .map(|_| {
            let weights = (0..inputs).map(|_| rng.gen_uniform(-bound, bound)).collect();
            Neuron::new(alpha, weights)
        })
        .collect();
    Layer::from_uniform(neurons)
}
