//! Network topology configuration.
//!
//! `NetworkConfig` describes the shape of a fresh network and builds it with
//! randomly initialized weights. The board has 9 cells, so the defaults are a
//! 9-wide input and a 9-wide output (one score per cell).

use serde::{Deserialize, Serialize};

use super::rng::SeededRng;
use crate::nn::NeuralNetwork;

/// Number of cells on the board, and therefore the network's input/output width.
pub const BOARD_CELLS: usize = 9;

/// Default neuron alpha (sigmoid steepness) for new layers.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Default learning rate passed to `back_prop`.
pub const DEFAULT_LEARNING_RATE: f64 = 2.0;

/// Topology and initialization settings for a new network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Width of the external input.
    pub input_size: usize,

    /// Neuron counts of the hidden layers, in order.
    pub hidden_layers: Vec<usize>,

    /// Width of the output layer.
    pub output_size: usize,

    /// Alpha given to every neuron.
    pub alpha: f64,

    /// Prepend a constant-one layer that is never trained.
    pub initial_layer: bool,

    /// Initialize hidden layers in `[-1, 1]` instead of `[-0.1, 0.1]`.
    pub wide_init: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_size: BOARD_CELLS,
            hidden_layers: vec![BOARD_CELLS],
            output_size: BOARD_CELLS,
            alpha: DEFAULT_ALPHA,
            initial_layer: true,
            wide_init: false,
        }
    }
}

impl NetworkConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hidden layer sizes.
    #[must_use]
    pub fn with_hidden_layers(mut self, layers: Vec<usize>) -> Self {
        self.hidden_layers = layers;
        self
    }

    /// Set the alpha for every neuron.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Enable or disable the constant-one initial layer.
    #[must_use]
    pub fn with_initial_layer(mut self, enabled: bool) -> Self {
        self.initial_layer = enabled;
        self
    }

    /// Use the wide `[-1, 1]` initialization for hidden layers.
    #[must_use]
    pub fn with_wide_init(mut self, wide: bool) -> Self {
        self.wide_init = wide;
        self
    }

    /// Build a network with this topology.
    ///
    /// The initial layer, when enabled, is `input_size` wide and feeds the
    /// first hidden layer. The output layer always uses the narrow init.
    pub fn build(&self, rng: &mut SeededRng) -> NeuralNetwork {
        let mut network = NeuralNetwork::new();
        let mut width = self.input_size;

        for &nodes in &self.hidden_layers {
            if self.wide_init {
                network.new_random_layer(nodes, width, self.alpha, rng);
            } else {
                network.new_layer(nodes, width, self.alpha, rng);
            }
            width = nodes;
        }
        network.new_layer(self.output_size, width, self.alpha, rng);

        if self.initial_layer {
            network.new_initial_layer(self.input_size, self.input_size, self.alpha);
        }

        network
    }
}
