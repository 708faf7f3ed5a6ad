//! Least-squares gradient boosting over regression trees.
//!
//! Each round fits a tree to the current residuals and adds it, scaled by
//! the learning rate, to the running prediction. The initial prediction is
//! the target mean. The fitted ensemble serializes to JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::features::FEATURE_COUNT;
use super::tree::{RegressionTree, TreeParams};
use crate::error::RiskModelError;

const FORMAT_VERSION: u32 = 1;

/// Hyperparameters for [`GradientBoostedRegressor::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostingParams {
    pub estimators: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
    pub min_samples_leaf: usize,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            estimators: 100,
            max_depth: 6,
            learning_rate: 0.3,
            min_samples_leaf: 1,
        }
    }
}

impl BoostingParams {
    fn validate(&self) -> Result<(), RiskModelError> {
        if self.estimators == 0 {
            return Err(RiskModelError::InvalidParams(
                "estimators must be at least 1".into(),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(RiskModelError::InvalidParams(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// A fitted boosted ensemble.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradientBoostedRegressor {
    version: u32,
    base_score: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedRegressor {
    /// Fit an ensemble to `(features, targets)`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTrainingSet` for no samples, `InvalidFeatures` when
    /// the row and target counts differ, and `InvalidParams` for bad
    /// hyperparameters.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(
        features: &[[f64; FEATURE_COUNT]],
        targets: &[f64],
        params: &BoostingParams,
    ) -> Result<Self, RiskModelError> {
        params.validate()?;
        if targets.is_empty() {
            return Err(RiskModelError::EmptyTrainingSet);
        }
        if features.len() != targets.len() {
            return Err(RiskModelError::InvalidFeatures {
                expected: targets.len(),
                actual: features.len(),
            });
        }

        let base_score = targets.iter().sum::<f64>() / targets.len() as f64;
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_leaf: params.min_samples_leaf,
        };

        let mut predictions = vec![base_score; targets.len()];
        let mut residuals = vec![0.0; targets.len()];
        let mut trees = Vec::with_capacity(params.estimators);
        for _ in 0..params.estimators {
            for (residual, (target, prediction)) in residuals
                .iter_mut()
                .zip(targets.iter().zip(predictions.iter()))
            {
                *residual = target - prediction;
            }
            let tree = RegressionTree::fit(features, &residuals, tree_params);
            for (prediction, row) in predictions.iter_mut().zip(features) {
                *prediction += params.learning_rate * tree.predict(row);
            }
            trees.push(tree);
        }

        Ok(Self {
            version: FORMAT_VERSION,
            base_score,
            learning_rate: params.learning_rate,
            trees,
        })
    }

    /// Raw ensemble output for one row.
    #[must_use]
    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        self.base_score
            + self.learning_rate * self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Persist as JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` on failure.
    pub fn save(&self, path: &Path) -> Result<(), RiskModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a persisted ensemble.
    ///
    /// # Errors
    ///
    /// Returns `Io`, `Serialization`, or `InvalidModel`.
    pub fn load(path: &Path) -> Result<Self, RiskModelError> {
        let bytes = std::fs::read(path)?;
        let model: Self = serde_json::from_slice(&bytes)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), RiskModelError> {
        if self.version != FORMAT_VERSION {
            return Err(RiskModelError::InvalidModel(format!(
                "unsupported format version {}",
                self.version
            )));
        }
        if !self.base_score.is_finite() || !self.learning_rate.is_finite() {
            return Err(RiskModelError::InvalidModel(
                "non-finite model parameters".into(),
            ));
        }
        if self.trees.is_empty() {
            return Err(RiskModelError::InvalidModel("model has no trees".into()));
        }
        self.trees.iter().try_for_each(RegressionTree::validate)
    }
}
