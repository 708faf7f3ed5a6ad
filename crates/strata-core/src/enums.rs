//! Severity, scorer, inspection, entity, and audit enums for Strata.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the SQL storage representation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Risk classification attached to every decision and risk event.
///
/// The deterministic scorer produces `Low`, `Moderate`, `High`, `Critical`.
/// The learned scorer produces `Low`, `Medium`, `High`, `Critical`, or
/// `Unavailable` when no model could be loaded. Variants are ordered by
/// escalation weight, with `Unavailable` lowest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Unavailable,
    Low,
    Moderate,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Human-readable label used in trace stubs and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unavailable => "Unavailable",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// High and Critical decisions require governance escalation.
    #[must_use]
    pub const fn requires_escalation(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ScorerKind
// ---------------------------------------------------------------------------

/// Which scoring path produced a risk event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    Deterministic,
    Learned,
}

impl ScorerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Learned => "learned",
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ThresholdAction
// ---------------------------------------------------------------------------

/// What the caller should do with a recorded decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdAction {
    /// Low-impact outcome; the change may be applied directly.
    AutoApply,
    /// Escalated outcome; the trace stub must be anchored and approved.
    LedgerApproval,
}

impl ThresholdAction {
    #[must_use]
    pub const fn for_severity(severity: Severity) -> Self {
        if severity.requires_escalation() {
            Self::LedgerApproval
        } else {
            Self::AutoApply
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoApply => "auto_apply",
            Self::LedgerApproval => "ledger_approval",
        }
    }
}

impl fmt::Display for ThresholdAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InspectionLevel
// ---------------------------------------------------------------------------

/// Inspection regime applied to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InspectionLevel {
    #[default]
    Normal,
    Enhanced,
    RegulatoryCritical,
}

impl InspectionLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Enhanced => "enhanced",
            Self::RegulatoryCritical => "regulatory_critical",
        }
    }

    /// Parse a free-form label such as `"Regulatory Critical"` or
    /// `"enhanced"`. Unknown labels fall back to `Normal`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "enhanced" => Self::Enhanced,
            "regulatory_critical" | "critical" => Self::RegulatoryCritical,
            _ => Self::Normal,
        }
    }

    /// Feature score on the 0–10 scale used by the learned scorer.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Enhanced => 5.0,
            Self::RegulatoryCritical => 10.0,
        }
    }

    /// Anything above the normal regime.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl fmt::Display for InspectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Entity kinds, used by the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    Zone,
    Component,
    Decision,
    RiskEvent,
    Model,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Zone => "zone",
            Self::Component => "component",
            Self::Decision => "decision",
            Self::RiskEvent => "risk_event",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Deleted,
    Recorded,
    VisualStateUpdated,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Deleted => "deleted",
            Self::Recorded => "recorded",
            Self::VisualStateUpdated => "visual_state_updated",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_snake_case() {
        let json = serde_json::to_string(&Severity::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
        let back: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(back, Severity::Critical);
    }

    #[test]
    fn severity_as_str_matches_serde() {
        for severity in [
            Severity::Unavailable,
            Severity::Low,
            Severity::Moderate,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            let json = serde_json::to_value(severity).unwrap();
            assert_eq!(json.as_str(), Some(severity.as_str()));
        }
    }

    #[test]
    fn only_high_and_critical_escalate() {
        assert!(!Severity::Unavailable.requires_escalation());
        assert!(!Severity::Low.requires_escalation());
        assert!(!Severity::Moderate.requires_escalation());
        assert!(!Severity::Medium.requires_escalation());
        assert!(Severity::High.requires_escalation());
        assert!(Severity::Critical.requires_escalation());
    }

    #[test]
    fn threshold_action_follows_escalation() {
        assert_eq!(
            ThresholdAction::for_severity(Severity::Moderate),
            ThresholdAction::AutoApply
        );
        assert_eq!(
            ThresholdAction::for_severity(Severity::Critical),
            ThresholdAction::LedgerApproval
        );
    }

    #[test]
    fn inspection_level_parses_free_form_labels() {
        assert_eq!(
            InspectionLevel::parse_lenient("Regulatory Critical"),
            InspectionLevel::RegulatoryCritical
        );
        assert_eq!(
            InspectionLevel::parse_lenient("ENHANCED"),
            InspectionLevel::Enhanced
        );
        assert_eq!(
            InspectionLevel::parse_lenient("whatever"),
            InspectionLevel::Normal
        );
    }

    #[test]
    fn severity_ordering_ranks_unavailable_lowest() {
        assert!(Severity::Unavailable < Severity::Low);
        assert!(Severity::High < Severity::Critical);
    }
}
