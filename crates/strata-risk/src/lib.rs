//! # strata-risk
//!
//! The risk assessment engine for Strata.
//!
//! Two interchangeable scoring paths:
//! - [`deterministic`]: the pure multi-factor formula mapping regulatory,
//!   zone, and structural inputs to base/adjusted/final risk and a
//!   Low/Moderate/High/Critical severity.
//! - [`learned`]: a gradient-boosted regression ensemble over an
//!   8-feature vector, trained offline (or synthetically on first use),
//!   loaded once and shared read-only. Fails soft to a neutral
//!   `Unavailable` prediction.
//!
//! Inputs are sanitized, never rejected: see [`sanitize`].

pub mod deterministic;
pub mod error;
pub mod learned;
pub mod sanitize;

pub use deterministic::{RiskAssessment, RiskInputs, classify_severity, score};
pub use error::RiskModelError;
pub use learned::{EditParameters, FeatureVector, LearnedPrediction, LearnedScorer};
