//! Deterministic multi-factor risk scorer.
//!
//! ```text
//! base     = 1.0 × (1 + regulatory × 0.1) × (load_bearing ? 1.3 : 1.0) × (1 + deps × 0.05)
//! adjusted = base × (1 + importance × 0.1)
//! final    = adjusted × max(0.5, 1 − redundancy × 0.1) × (mitigation ? 0.85 : 1.0)
//! ```
//!
//! Each stage is rounded to 4 decimal places. Severity buckets on `final`
//! are closed-open: `[0, 1.2)` Low, `[1.2, 1.8)` Moderate, `[1.8, 2.5)` High,
//! `[2.5, ∞)` Critical.

use serde::{Deserialize, Serialize};
use strata_core::entities::{Component, Project, Zone};
use strata_core::enums::{InspectionLevel, Severity};
use strata_core::rounding::round_to;

use crate::sanitize;

const REGULATORY_WEIGHT: f64 = 0.1;
const LOAD_BEARING_MULTIPLIER: f64 = 1.3;
const DEPENDENCY_WEIGHT: f64 = 0.05;
const IMPORTANCE_WEIGHT: f64 = 0.1;
const REDUNDANCY_WEIGHT: f64 = 0.1;
const REDUNDANCY_FLOOR: f64 = 0.5;
const MITIGATION_MULTIPLIER: f64 = 0.85;

const LOW_CEILING: f64 = 1.2;
const MODERATE_CEILING: f64 = 1.8;
const HIGH_CEILING: f64 = 2.5;

/// Inputs to the deterministic scorer.
///
/// Deserialization is lenient: `null`, missing fields, numeric strings, and
/// garbage all collapse to the sanitized defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    #[serde(default, deserialize_with = "sanitize::lenient_level")]
    pub regulatory_level: f64,
    #[serde(default, deserialize_with = "sanitize::lenient_level")]
    pub importance_factor: f64,
    #[serde(default, deserialize_with = "sanitize::lenient_flag")]
    pub load_bearing: bool,
    #[serde(default, deserialize_with = "sanitize::lenient_count")]
    pub dependency_count: u32,
    #[serde(default, deserialize_with = "sanitize::lenient_level")]
    pub redundancy_level: f64,
    #[serde(default, deserialize_with = "sanitize::lenient_flag")]
    pub mitigation_flag: bool,
}

impl RiskInputs {
    /// Gather scorer inputs from the entity hierarchy.
    #[must_use]
    pub const fn from_entities(
        project: &Project,
        zone: &Zone,
        component: &Component,
        mitigation_flag: bool,
    ) -> Self {
        Self {
            regulatory_level: project.regulatory_level,
            importance_factor: zone.importance_factor,
            load_bearing: component.load_bearing,
            dependency_count: component.dependency_count,
            redundancy_level: component.redundancy_level,
            mitigation_flag,
        }
    }

    /// Copy with every numeric field replaced by its sanitized value.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            regulatory_level: sanitize::level(self.regulatory_level),
            importance_factor: sanitize::level(self.importance_factor),
            redundancy_level: sanitize::level(self.redundancy_level),
            ..self
        }
    }
}

/// Output of the deterministic scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub base_risk: f64,
    pub adjusted_risk: f64,
    pub redundancy_modifier: f64,
    pub final_score: f64,
    pub severity: Severity,
}

impl RiskAssessment {
    /// One-line breakdown of the factors behind the score.
    #[must_use]
    pub fn explanation(&self, mitigation_flag: bool) -> String {
        let mitigation = if mitigation_flag {
            MITIGATION_MULTIPLIER
        } else {
            1.0
        };
        format!(
            "base={:.4} adjusted={:.4} redundancy={:.2} mitigation={mitigation:.2}",
            self.base_risk, self.adjusted_risk, self.redundancy_modifier
        )
    }
}

/// Round to 4 decimal places, ties to even on the exact binary value.
#[must_use]
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// `max(0.5, 1 − redundancy × 0.1)`, always within `[0.5, 1.0]` for
/// sanitized input.
#[must_use]
pub fn redundancy_modifier(redundancy_level: f64) -> f64 {
    REDUNDANCY_FLOOR.max(1.0 - sanitize::level(redundancy_level) * REDUNDANCY_WEIGHT)
}

/// Map a final score onto the four deterministic buckets.
#[must_use]
pub fn classify_severity(final_score: f64) -> Severity {
    if final_score < LOW_CEILING {
        Severity::Low
    } else if final_score < MODERATE_CEILING {
        Severity::Moderate
    } else if final_score < HIGH_CEILING {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Score a sanitized copy of `inputs`. Pure; never fails.
#[must_use]
pub fn score(inputs: RiskInputs) -> RiskAssessment {
    let inputs = inputs.sanitized();

    let mut base_risk = 1.0;
    base_risk *= 1.0 + inputs.regulatory_level * REGULATORY_WEIGHT;
    if inputs.load_bearing {
        base_risk *= LOAD_BEARING_MULTIPLIER;
    }
    base_risk *= 1.0 + f64::from(inputs.dependency_count) * DEPENDENCY_WEIGHT;
    let base_risk = round4(base_risk);

    let adjusted_risk = round4(base_risk * (1.0 + inputs.importance_factor * IMPORTANCE_WEIGHT));

    let redundancy_modifier = redundancy_modifier(inputs.redundancy_level);
    let mut final_score = adjusted_risk * redundancy_modifier;
    if inputs.mitigation_flag {
        final_score *= MITIGATION_MULTIPLIER;
    }
    let final_score = round4(final_score);

    RiskAssessment {
        base_risk,
        adjusted_risk,
        redundancy_modifier,
        final_score,
        severity: classify_severity(final_score),
    }
}

/// Confidence attached to governance recordings.
///
/// More dependencies and an elevated inspection regime mean more evidence
/// behind the score: `min(0.6 + 0.02 × deps + (0.1 if elevated), 0.95)`,
/// rounded to 2 places.
#[must_use]
pub fn assessment_confidence(dependency_count: u32, inspection: InspectionLevel) -> f64 {
    let inspection_bonus = if inspection.is_elevated() { 0.1 } else { 0.0 };
    let raw = (0.6 + f64::from(dependency_count) * 0.02 + inspection_bonus).min(0.95);
    round_to(raw, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn neutral_inputs_score_one() {
        let assessment = score(RiskInputs::default());
        assert!(approx(assessment.base_risk, 1.0));
        assert!(approx(assessment.adjusted_risk, 1.0));
        assert!(approx(assessment.redundancy_modifier, 1.0));
        assert!(approx(assessment.final_score, 1.0));
        assert_eq!(assessment.severity, Severity::Low);
    }

    #[test]
    fn sanitized_replaces_nan_and_negative_levels() {
        let inputs = RiskInputs {
            regulatory_level: f64::NAN,
            importance_factor: -3.0,
            redundancy_level: f64::NEG_INFINITY,
            ..RiskInputs::default()
        }
        .sanitized();
        assert!(inputs.regulatory_level.abs() < f64::EPSILON);
        assert!(inputs.importance_factor.abs() < f64::EPSILON);
        assert!(inputs.redundancy_level.abs() < f64::EPSILON);
    }

    #[test]
    fn redundancy_modifier_floors_at_half() {
        assert!(approx(redundancy_modifier(0.0), 1.0));
        assert!(approx(redundancy_modifier(2.0), 0.8));
        assert!(approx(redundancy_modifier(5.0), 0.5));
        assert!(approx(redundancy_modifier(50.0), 0.5));
        assert!(approx(redundancy_modifier(-10.0), 1.0));
    }

    #[test]
    fn confidence_caps_at_point_nine_five() {
        assert!(approx(assessment_confidence(0, InspectionLevel::Normal), 0.6));
        assert!(approx(assessment_confidence(5, InspectionLevel::Enhanced), 0.8));
        assert!(approx(
            assessment_confidence(40, InspectionLevel::RegulatoryCritical),
            0.95
        ));
    }

    #[test]
    fn explanation_lists_each_factor() {
        let assessment = score(RiskInputs {
            redundancy_level: 2.0,
            mitigation_flag: true,
            ..RiskInputs::default()
        });
        let text = assessment.explanation(true);
        assert!(text.contains("base=1.0000"), "{text}");
        assert!(text.contains("redundancy=0.80"), "{text}");
        assert!(text.contains("mitigation=0.85"), "{text}");
    }
}
