use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// A governance decision about a component. Write-once.
///
/// `severity` is copied from the paired `RiskEvent` at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Decision {
    pub id: String,
    pub component_id: String,
    /// Free-form decision kind, e.g. `Accept`, `Reject`, `Modify`.
    pub decision_type: String,
    pub severity: Severity,
    pub mitigation_flag: bool,
    pub timestamp: DateTime<Utc>,
}
