//! Win/loss/draw percentages across evaluation runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::self_play::SelfPlayReport;
use crate::core::Result;

/// Per-run percentages, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationHistory {
    pub wins: Vec<f64>,
    pub losses: Vec<f64>,
    pub draws: Vec<f64>,
}

/// Mean percentages over a history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryMeans {
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
}

impl EvaluationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one run's percentages.
    pub fn push(&mut self, report: &SelfPlayReport) {
        self.wins.push(report.win_pct());
        self.losses.push(report.loss_pct());
        self.draws.push(report.draw_pct());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    /// Means of each series; `None` for an empty history.
    #[must_use]
    pub fn means(&self) -> Option<HistoryMeans> {
        fn mean(xs: &[f64]) -> f64 {
            xs.iter().sum::<f64>() / xs.len() as f64
        }
        if self.is_empty() {
            return None;
        }
        Some(HistoryMeans {
            win: mean(&self.wins),
            loss: mean(&self.losses),
            draw: mean(&self.draws),
        })
    }

    /// Load a history, or start an empty one when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let history: Self = bincode::deserialize(&fs::read(path)?)?;
        Ok(history)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, bincode::serialize(self)?)?;
        info!(path = %path.display(), runs = self.len(), "saved evaluation history");
        Ok(())
    }
}
