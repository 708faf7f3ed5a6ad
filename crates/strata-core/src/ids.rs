//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, e.g. `cmp-a3f8b2c1`.
//! The random part is generated by the store.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_ZONE: &str = "zon";
pub const PREFIX_COMPONENT: &str = "cmp";
pub const PREFIX_DECISION: &str = "dec";
pub const PREFIX_RISK_EVENT: &str = "rsk";
pub const PREFIX_MODEL: &str = "mdl";
pub const PREFIX_AUDIT: &str = "aud";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_ZONE,
    PREFIX_COMPONENT,
    PREFIX_DECISION,
    PREFIX_RISK_EVENT,
    PREFIX_MODEL,
    PREFIX_AUDIT,
];
