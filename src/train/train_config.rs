use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Hyperparameters for a training run.
///
/// # Fields
/// - `epochs`        — full passes over the training data; always run to completion
/// - `batch_size`    — samples per update; `1` gives one Adam step per example
/// - `learning_rate` — Adam base step size
/// - `beta1`, `beta2`, `epsilon` — Adam moment decay rates and denominator guard
/// - `hidden_units`  — width of the ReLU layer
/// - `seed`          — fixes weight initialization and shuffle order when set
///
/// Any field missing from a JSON config file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    pub hidden_units: usize,
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 200,
            batch_size: 1,
            learning_rate: 0.01,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            hidden_units: 8,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reads a config from a JSON file and validates it.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let file = File::open(path)?;
        let config: TrainConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidInput("batch_size must be at least 1".into()));
        }
        if self.hidden_units == 0 {
            return Err(Error::InvalidInput("hidden_units must be at least 1".into()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidInput("learning_rate must be positive and finite".into()));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::InvalidInput("epsilon must be positive and finite".into()));
        }
        if !(0.0..1.0).contains(&self.beta1) || !(0.0..1.0).contains(&self.beta2) {
            return Err(Error::InvalidInput("beta1 and beta2 must lie in [0, 1)".into()));
        }
        Ok(())
    }
}
