use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A structural component within a zone.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Component {
    pub id: String,
    pub zone_id: String,
    /// e.g. `Load Bearing Wall`, `Steel Beam`.
    pub component_type: String,
    pub load_bearing: bool,
    pub dependency_count: u32,
    /// Higher redundancy lowers risk (floored at a 0.5 modifier).
    pub redundancy_level: f64,
    /// Optional link to the 3D asset that visualises this component.
    pub model_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
