//! Response types returned by the recorder and printed as JSON by `strata`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Decision, RiskEvent};
use crate::enums::{ScorerKind, Severity, ThresholdAction};
use crate::rounding::round_to;

/// Escalation message attached to High and Critical recordings.
pub const ESCALATION_WARNING: &str = "Governance escalation required";

/// Governance-ready summary of one recorded decision.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DecisionRecord {
    pub decision_id: String,
    pub risk_event_id: String,
    pub component_id: String,
    pub project_id: String,
    pub scorer: ScorerKind,
    pub severity: Severity,
    pub final_score: f64,
    pub base_risk: Option<f64>,
    pub adjusted_risk: Option<f64>,
    pub confidence: Option<f64>,
    pub explanation: Option<String>,
    pub escalation_warning: Option<String>,
    pub threshold_action: ThresholdAction,
    /// Audit stub for downstream ledger anchoring.
    pub trace_id: String,
}

impl DecisionRecord {
    /// Whether the recording requires governance escalation.
    #[must_use]
    pub const fn is_escalated(&self) -> bool {
        self.escalation_warning.is_some()
    }
}

/// Build the trace stub: `SS-{decision_id}-{Severity}-{score}`, with the
/// score rounded to 2 places and printed in its shortest form (`1.9`,
/// `1.94`, `0.0`).
#[must_use]
pub fn trace_stub(decision_id: &str, severity: Severity, final_score: f64) -> String {
    format!(
        "SS-{decision_id}-{}-{:?}",
        severity.label(),
        round_to(final_score, 2)
    )
}

/// Response from `strata component edit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComponentEditResponse {
    pub edit_type: String,
    pub decision: DecisionRecord,
    /// New asset reference when the model's visual state was refreshed.
    pub storage_url: Option<String>,
}

/// A decision together with its risk event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DecisionDetail {
    pub decision: Decision,
    pub risk_event: RiskEvent,
}

/// A model category and how many models it holds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ModelCategory {
    pub name: String,
    pub model_count: u32,
}

/// Response from `strata seed`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeedResponse {
    pub projects: u32,
    pub zones: u32,
    pub components: u32,
    pub models: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_stub_rounds_score_to_two_places() {
        let stub = trace_stub("dec-0000abcd", Severity::High, 1.9435);
        assert_eq!(stub, "SS-dec-0000abcd-High-1.94");
    }

    #[test]
    fn trace_stub_prints_shortest_score() {
        let stub = trace_stub("dec-1", Severity::Moderate, 1.652);
        assert_eq!(stub, "SS-dec-1-Moderate-1.65");
        let stub = trace_stub("dec-2", Severity::High, 1.8999);
        assert_eq!(stub, "SS-dec-2-High-1.9");
        let stub = trace_stub("dec-3", Severity::Critical, 3.0);
        assert_eq!(stub, "SS-dec-3-Critical-3.0");
        let stub = trace_stub("dec-4", Severity::Unavailable, 0.0);
        assert_eq!(stub, "SS-dec-4-Unavailable-0.0");
    }
}
