use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// External 3D-asset metadata attached to a project.
///
/// Not part of the risk engine; `current_risk` and `current_severity` only
/// mirror the latest recorded score for visualisation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Model {
    pub id: String,
    pub project_id: String,
    pub category: String,
    pub name: String,
    /// Public URL or object-store reference of the current asset revision.
    pub external_asset_reference: String,
    pub current_risk: Option<f64>,
    pub current_severity: Option<Severity>,
    pub updated_at: DateTime<Utc>,
}
