use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ScorerKind, Severity};

/// The immutable scoring result paired one-to-one with a `Decision`.
///
/// One schema serves both scorers: the deterministic path fills
/// `base_risk` and `adjusted_risk`; the learned path leaves them empty and
/// carries its model output in `final_score` and `explanation`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiskEvent {
    pub id: String,
    pub decision_id: String,
    pub scorer: ScorerKind,
    pub base_risk: Option<f64>,
    pub adjusted_risk: Option<f64>,
    pub final_score: f64,
    pub severity: Severity,
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
}
