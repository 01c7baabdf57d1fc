use std::fs;
use std::path::Path;

use serde::Deserialize;
use ttt_nn::SymbolEncoder;

/// Optional settings file (JSON). Every field may be omitted; command line
/// flags take precedence over values found here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Learning rate for `train`
    pub learning_rate: Option<f64>,
    /// Training epochs
    pub epochs: Option<usize>,
    /// Evaluation games
    pub games: Option<usize>,
    /// Seed for every random stream
    pub seed: Option<u64>,
    /// Hidden layer sizes for `init`
    pub hidden_layers: Option<Vec<usize>>,
    /// Neuron alpha for `init`
    pub alpha: Option<f64>,
    /// Symbol encoding used for move selection and examples
    pub encoding: Option<SymbolEncoder>,
}

impl AppConfig {
    pub fn load(path: &Path) -> ttt_nn::Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    // merge configs where the second overwrites the first
    pub fn merge(self, other: Self) -> Self {
        Self {
            learning_rate: other.learning_rate.or(self.learning_rate),
            epochs: other.epochs.or(self.epochs),
            games: other.games.or(self.games),
            seed: other.seed.or(self.seed),
            hidden_layers: other.hidden_layers.or(self.hidden_layers),
            alpha: other.alpha.or(self.alpha),
            encoding: other.encoding.or(self.encoding),
        }
    }

    pub fn encoder(&self) -> SymbolEncoder {
        self.encoding.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_second() {
        let file = AppConfig {
            epochs: Some(5),
            games: Some(100),
            ..Default::default()
        };
        let cli = AppConfig {
            games: Some(10),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.epochs, Some(5));
        assert_eq!(merged.games, Some(10));
        assert_eq!(merged.seed, None);
    }

    #[test]
    fn test_parse_partial() {
        let config: AppConfig =
            serde_json::from_str(r#"{"seed": 3, "encoding": {"naught": 1.0, "cross": -1.0, "empty": 0.5}}"#)
                .unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.encoder().empty, 0.5);
    }
}
