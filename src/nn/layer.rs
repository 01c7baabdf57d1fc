//! A layer of neurons sharing one input vector.

use serde::{Deserialize, Serialize};

use super::neuron::Neuron;
use crate::core::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Build a layer from per-neuron weights and alphas.
    ///
    /// Fails when the two lists differ in length or the neurons disagree on
    /// their input size.
    pub fn new(weights: Vec<Vec<f64>>, alphas: Vec<f64>) -> Result<Self> {
        if weights.len() != alphas.len() {
            return Err(Error::shape("layer alphas", weights.len(), alphas.len()));
        }
        let neurons: Vec<Neuron> = weights
            .into_iter()
            .zip(alphas)
            .map(|(w, a)| Neuron::new(a, w))
            .collect();
        Self::from_neurons(neurons)
    }

    /// Build a layer from existing neurons.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Result<Self> {
        if let Some(first) = neurons.first() {
            let width = first.input_size();
            if let Some(bad) = neurons.iter().find(|n| n.input_size() != width) {
                return Err(Error::shape("layer neuron weights", width, bad.input_size()));
            }
        }
        Ok(Self { neurons })
    }

    /// Wrap neurons that were all created with the same width.
    pub(crate) fn from_uniform(neurons: Vec<Neuron>) -> Self {
        debug_assert!(
            neurons.windows(2).all(|p| p[0].input_size() == p[1].input_size()),
            "Neurons must share an input width"
        );
        Self { neurons }
    }

    #[must_use]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Number of neurons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Input width shared by every neuron (0 for an empty layer).
    #[must_use]
    pub fn input_size(&self) -> usize {
        self.neurons.first().map_or(0, Neuron::input_size)
    }

    /// Apply every neuron to the same `inputs`.
    pub fn calc(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.neurons.iter_mut().map(|n| n.output(inputs)).collect()
    }
}
