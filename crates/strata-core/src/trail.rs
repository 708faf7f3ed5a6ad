//! JSONL governance trail envelope.
//!
//! Every committed recording is appended as a `TrailOperation` line to a
//! per-project `{trail_dir}/{project_id}.jsonl` file. The trail carries the
//! trace stub that downstream ledgers anchor; it is an export, not a source
//! of truth for the store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ScorerKind, Severity, ThresholdAction};

/// Default trail version for lines written without a `v` field.
const fn default_trail_version() -> u32 {
    1
}

/// A single recorded decision in the governance trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 when absent.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the recording.
    pub ts: String,

    pub project_id: String,
    pub component_id: String,
    pub decision_id: String,

    /// Trace stub (`SS-…`) for anchoring.
    pub trace_id: String,

    pub scorer: ScorerKind,
    pub severity: Severity,
    pub final_score: f64,
    pub threshold_action: ThresholdAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_version_defaults_to_one() {
        let json = r#"{
            "ts": "2026-02-08T12:00:00Z",
            "project_id": "prj-00000001",
            "component_id": "cmp-00000001",
            "decision_id": "dec-00000001",
            "trace_id": "SS-dec-00000001-High-1.94",
            "scorer": "deterministic",
            "severity": "high",
            "final_score": 1.9435,
            "threshold_action": "ledger_approval"
        }"#;
        let op: TrailOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.v, 1);
        assert_eq!(op.severity, Severity::High);
        assert_eq!(op.threshold_action, ThresholdAction::LedgerApproval);
    }
}
