//! Learned-model error types.

use thiserror::Error;

/// Errors from training, persisting, or loading the learned risk model.
///
/// None of these escape `LearnedScorer::predict`; a scorer without a model
/// answers with a neutral `Unavailable` prediction instead.
#[derive(Debug, Error)]
pub enum RiskModelError {
    /// No model is loaded.
    #[error("Risk model unavailable: {0}")]
    Unavailable(String),

    /// The feature vector has the wrong arity.
    #[error("Expected {expected} features, got {actual}")]
    InvalidFeatures { expected: usize, actual: usize },

    /// Training was attempted with no samples.
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Training parameters are out of range.
    #[error("Invalid training parameters: {0}")]
    InvalidParams(String),

    /// A persisted model failed structural validation.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Reading or writing the model file failed.
    #[error("Model I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model file is not valid JSON for this format.
    #[error("Model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
