//! Learned risk model configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_path() -> String {
    String::from(".strata/risk_model.json")
}

const fn default_enabled() -> bool {
    true
}

const fn default_estimators() -> usize {
    100
}

const fn default_max_depth() -> usize {
    6
}

const fn default_learning_rate() -> f64 {
    0.3
}

const fn default_sample_count() -> usize {
    1000
}

const fn default_seed() -> u64 {
    42
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Persisted ensemble. Trained from synthetic data when absent.
    #[serde(default = "default_path")]
    pub path: String,

    /// When false the learned scorer starts unavailable.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_estimators")]
    pub estimators: usize,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Synthetic training set size.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            enabled: default_enabled(),
            estimators: default_estimators(),
            max_depth: default_max_depth(),
            learning_rate: default_learning_rate(),
            sample_count: default_sample_count(),
            seed: default_seed(),
        }
    }
}

impl ModelConfig {
    /// Reject hyperparameters the trainer cannot use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimators == 0 {
            return Err(ConfigError::InvalidValue {
                field: "model.estimators".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "model.learning_rate".into(),
                reason: format!("must be in (0, 1], got {}", self.learning_rate),
            });
        }
        if self.sample_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "model.sample_count".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
