//! Persistence for trained networks.
//!
//! Two formats:
//! - **Weight file** (JSON, tab-indented): `{"layers": [[[w]]], "alphas": [[a]]}`.
//!   Human-diffable; validated on load.
//! - **Snapshot** (bincode): the whole `NeuralNetwork`, including its hidden
//!   error rule. Opaque but compact.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::network::NeuralNetwork;
use crate::core::Result;

/// Interchange record for a network's weights and alphas.
///
/// `layers[l][n]` is the weight vector of neuron `n` in layer `l`;
/// `alphas[l][n]` is that neuron's alpha.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightFile {
    pub layers: Vec<Vec<Vec<f64>>>,
    pub alphas: Vec<Vec<f64>>,
}

impl WeightFile {
    /// Capture the weights of a network.
    pub fn from_network(network: &NeuralNetwork) -> Self {
        let layers = network
            .layers()
            .iter()
            .map(|l| l.neurons().iter().map(|n| n.weights().to_vec()).collect())
            .collect();
        let alphas = network
            .layers()
            .iter()
            .map(|l| l.neurons().iter().map(|n| n.alpha()).collect())
            .collect();
        Self { layers, alphas }
    }

    /// Rebuild a network, checking every dimension.
    pub fn into_network(self) -> Result<NeuralNetwork> {
        NeuralNetwork::from_weights(self.layers, self.alphas)
    }

    /// Serialize as tab-indented JSON.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Write a network's weights as JSON.
pub fn save_json(network: &NeuralNetwork, path: &Path) -> Result<()> {
    let text = WeightFile::from_network(network).to_json()?;
    fs::write(path, text)?;
    info!(path = %path.display(), layers = network.layer_count(), "saved weight file");
    Ok(())
}

/// Read and validate a JSON weight file.
pub fn load_json(path: &Path) -> Result<NeuralNetwork> {
    let text = fs::read_to_string(path)?;
    let network = WeightFile::from_json(&text)?.into_network()?;
    info!(path = %path.display(), layers = network.layer_count(), "loaded weight file");
    Ok(network)
}

/// Write a bincode snapshot of the whole network.
pub fn save_snapshot(network: &NeuralNetwork, path: &Path) -> Result<()> {
    let bytes = bincode::serialize(network)?;
    fs::write(path, bytes)?;
    info!(path = %path.display(), "saved network snapshot");
    Ok(())
}

/// Read a bincode snapshot and check that its layers chain.
pub fn load_snapshot(path: &Path) -> Result<NeuralNetwork> {
    let bytes = fs::read(path)?;
    let network: NeuralNetwork = bincode::deserialize(&bytes)?;
    network.validate()?;
    info!(path = %path.display(), layers = network.layer_count(), "loaded network snapshot");
    Ok(network)
}

/// Save by extension: `.json` writes a weight file, anything else a snapshot.
pub fn save(network: &NeuralNetwork, path: &Path) -> Result<()> {
    if is_json(path) {
        save_json(network, path)
    } else {
        save_snapshot(network, path)
    }
}

/// Load by extension, mirroring [`save`].
pub fn load(path: &Path) -> Result<NeuralNetwork> {
    if is_json(path) {
        load_json(path)
    } else {
        load_snapshot(path)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
