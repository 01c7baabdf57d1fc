//! Supervised training examples.
//!
//! An example pairs an encoded position with the encoded position the
//! network should aim for. Guided example creation starts from a random
//! board and records the board after a human reply.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::Result;
use crate::game::Board;
use crate::nn::SymbolEncoder;

/// One `(input, expected)` training pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Self {
        Self { input, expected }
    }

    /// Encode a position and the position after the desired reply.
    pub fn from_boards(before: &Board, after: &Board, encoder: &SymbolEncoder) -> Self {
        Self {
            input: encoder.encode_cells(before.cells().iter().flatten()),
            expected: encoder.encode_cells(after.cells().iter().flatten()),
        }
    }
}

/// Write examples; `.json` as JSON, anything else as bincode.
pub fn save_examples(examples: &[Example], path: &Path) -> Result<()> {
    if is_json(path) {
        fs::write(path, serde_json::to_string(examples)?)?;
    } else {
        fs::write(path, bincode::serialize(examples)?)?;
    }
    info!(path = %path.display(), count = examples.len(), "saved examples");
    Ok(())
}

/// Read examples written by [`save_examples`].
pub fn load_examples(path: &Path) -> Result<Vec<Example>> {
    let examples: Vec<Example> = if is_json(path) {
        serde_json::from_str(&fs::read_to_string(path)?)?
    } else {
        bincode::deserialize(&fs::read(path)?)?
    };
    info!(path = %path.display(), count = examples.len(), "loaded examples");
    Ok(examples)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}
