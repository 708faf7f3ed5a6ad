use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::InspectionLevel;

/// A zone within a project. Scales the risk of every component it owns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Zone {
    pub id: String,
    pub project_id: String,
    pub zone_name: String,
    /// Non-negative criticality factor.
    pub importance_factor: f64,
    pub inspection_level: InspectionLevel,
    pub created_at: DateTime<Utc>,
}
