//! Entity structs for all Strata domain objects.
//!
//! Each entity maps to a table in the libSQL store. Ownership is strictly
//! top-down (project → zone → component → decision → risk event); upward
//! links are plain IDs resolved by lookup, never live references.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod audit;
mod component;
mod decision;
mod model;
mod project;
mod risk_event;
mod zone;

pub use audit::AuditEntry;
pub use component::Component;
pub use decision::Decision;
pub use model::Model;
pub use project::Project;
pub use risk_event::RiskEvent;
pub use zone::Zone;
