//! Learned risk scorer.
//!
//! A gradient-boosted regression ensemble over an 8-feature vector. The
//! model is loaded (or bootstrapped from synthetic data) once at startup
//! and shared read-only behind an `Arc`. A scorer without a model answers
//! every request with a neutral `0.0` / [`Severity::Unavailable`]
//! prediction instead of failing.

pub mod boosting;
pub mod features;
pub mod synthetic;
pub mod tree;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_core::enums::Severity;

pub use boosting::{BoostingParams, GradientBoostedRegressor};
pub use features::{EditParameters, FEATURE_COUNT, FEATURE_NAMES, FeatureVector};

use crate::error::RiskModelError;

const SCORE_CEILING: f64 = 10.0;
const UNAVAILABLE_EXPLANATION: &str = "model unavailable";

/// Training knobs used when no persisted model exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSettings {
    pub params: BoostingParams,
    pub sample_count: usize,
    pub seed: u64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            params: BoostingParams::default(),
            sample_count: 1000,
            seed: 42,
        }
    }
}

/// Output of [`LearnedScorer::predict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedPrediction {
    pub score: f64,
    pub category: Severity,
    pub explanation: String,
}

impl LearnedPrediction {
    fn unavailable() -> Self {
        Self {
            score: 0.0,
            category: Severity::Unavailable,
            explanation: UNAVAILABLE_EXPLANATION.to_string(),
        }
    }
}

/// Map a learned score onto `Low`/`Medium`/`High`/`Critical`.
///
/// Closed-open buckets: `[0, 2)`, `[2, 4.5)`, `[4.5, 7.5)`, `[7.5, ∞)`.
#[must_use]
pub fn classify_learned(score: f64) -> Severity {
    if score < 2.0 {
        Severity::Low
    } else if score < 4.5 {
        Severity::Medium
    } else if score < 7.5 {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Process-wide learned scorer. Cheap to clone; the model is shared.
#[derive(Debug, Clone, Default)]
pub struct LearnedScorer {
    model: Option<Arc<GradientBoostedRegressor>>,
}

impl LearnedScorer {
    #[must_use]
    pub fn from_model(model: GradientBoostedRegressor) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    /// A scorer with no model. Every prediction is `Unavailable`.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { model: None }
    }

    /// Fit a fresh model on synthetic data.
    ///
    /// # Errors
    ///
    /// Returns `RiskModelError` if the settings are invalid.
    pub fn train(settings: &TrainingSettings) -> Result<Self, RiskModelError> {
        let data = synthetic::generate(settings.sample_count, settings.seed);
        let model = GradientBoostedRegressor::fit(&data.features, &data.targets, &settings.params)?;
        tracing::info!(
            trees = model.tree_count(),
            samples = settings.sample_count,
            "learned risk model trained"
        );
        Ok(Self::from_model(model))
    }

    /// Load the model at `path`, or train and persist one if the file does
    /// not exist. Never fails: any error yields an unavailable scorer.
    #[must_use]
    pub fn load_or_train(path: &Path, settings: &TrainingSettings) -> Self {
        if path.exists() {
            return match GradientBoostedRegressor::load(path) {
                Ok(model) => {
                    tracing::debug!(path = %path.display(), "learned risk model loaded");
                    Self::from_model(model)
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "learned risk model unavailable");
                    Self::unavailable()
                }
            };
        }

        match Self::train(settings) {
            Ok(scorer) => {
                if let Err(error) = scorer.save(path) {
                    tracing::warn!(path = %path.display(), %error, "failed to persist learned risk model");
                }
                scorer
            }
            Err(error) => {
                tracing::warn!(%error, "learned risk model unavailable");
                Self::unavailable()
            }
        }
    }

    /// Persist the loaded model.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` when no model is loaded, or an I/O error.
    pub fn save(&self, path: &Path) -> Result<(), RiskModelError> {
        self.model
            .as_ref()
            .ok_or_else(|| RiskModelError::Unavailable("no model loaded".into()))?
            .save(path)
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Score one feature vector. Pure and infallible.
    #[must_use]
    pub fn predict(&self, features: &FeatureVector) -> LearnedPrediction {
        let Some(model) = &self.model else {
            return LearnedPrediction::unavailable();
        };
        let raw = model.predict(features.as_array());
        let score = if raw.is_finite() {
            raw.clamp(0.0, SCORE_CEILING)
        } else {
            0.0
        };
        LearnedPrediction {
            score,
            category: classify_learned(score),
            explanation: format!("gbt:{score:.2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_learned_boundaries() {
        assert_eq!(classify_learned(0.0), Severity::Low);
        assert_eq!(classify_learned(1.99), Severity::Low);
        assert_eq!(classify_learned(2.0), Severity::Medium);
        assert_eq!(classify_learned(4.5), Severity::High);
        assert_eq!(classify_learned(7.5), Severity::Critical);
        assert_eq!(classify_learned(10.0), Severity::Critical);
    }

    #[test]
    fn unavailable_scorer_fails_soft() {
        let scorer = LearnedScorer::unavailable();
        assert!(!scorer.is_available());
        let prediction = scorer.predict(&FeatureVector::new([5.0; FEATURE_COUNT]));
        assert!(prediction.score.abs() < f64::EPSILON);
        assert_eq!(prediction.category, Severity::Unavailable);
        assert_eq!(prediction.explanation, "model unavailable");
    }

    #[test]
    fn save_without_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = LearnedScorer::unavailable()
            .save(&dir.path().join("m.json"))
            .unwrap_err();
        assert!(matches!(err, RiskModelError::Unavailable(_)));
    }
}
