use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A structural-engineering project. Root of the ownership tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Building type, e.g. `Healthcare`, `Residential`, `Commercial`.
    pub project_type: String,
    /// Regulatory scale value; drives base risk.
    pub regulatory_level: f64,
    pub created_at: DateTime<Utc>,
}
