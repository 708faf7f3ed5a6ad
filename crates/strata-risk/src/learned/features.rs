//! The 8-feature vector consumed by the learned scorer.

use serde::{Deserialize, Serialize};
use strata_core::entities::{Component, Zone};

use crate::error::RiskModelError;
use crate::sanitize;

pub const FEATURE_COUNT: usize = 8;

/// Feature names in model order. Index 7 is the mitigation signal.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "span_length",
    "cost_impact",
    "delay_days",
    "dependency_count",
    "importance_factor",
    "redundancy_score",
    "inspection_score",
    "mitigation_score",
];

pub const MITIGATION_FEATURE: usize = 7;

const FEATURE_CEILING: f64 = 10.0;

/// Parameters describing a structural edit to be scored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditParameters {
    pub edit_type: String,
    /// Metres.
    pub span_length: f64,
    /// Currency units.
    pub cost_impact: f64,
    pub delay_days: f64,
}

impl Default for EditParameters {
    fn default() -> Self {
        Self {
            edit_type: String::from("Structural Edit"),
            span_length: 12.5,
            cost_impact: 75_000.0,
            delay_days: 7.0,
        }
    }
}

/// A sanitized feature vector. Non-finite entries are stored as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values.map(|v| if v.is_finite() { v } else { 0.0 }))
    }

    /// Project a structural edit and its entity context onto the 0–10
    /// feature scale the model is trained on.
    #[must_use]
    pub fn from_edit(
        edit: &EditParameters,
        component: &Component,
        zone: &Zone,
        mitigation: bool,
    ) -> Self {
        let scaled = |v: f64| sanitize::level(v).min(FEATURE_CEILING);
        Self([
            scaled(edit.span_length / 5.0),
            scaled(edit.cost_impact / 10_000.0),
            scaled(edit.delay_days / 3.0),
            scaled(f64::from(component.dependency_count)),
            scaled(zone.importance_factor * 5.0),
            scaled(component.redundancy_level * 2.0),
            zone.inspection_level.score(),
            if mitigation { FEATURE_CEILING } else { 0.0 },
        ])
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = RiskModelError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; FEATURE_COUNT] =
            values
                .try_into()
                .map_err(|_| RiskModelError::InvalidFeatures {
                    expected: FEATURE_COUNT,
                    actual: values.len(),
                })?;
        Ok(Self::new(array))
    }
}
