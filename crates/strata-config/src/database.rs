//! Entity store and governance trail locations.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from(".strata/strata.db")
}

fn default_trail_dir() -> String {
    String::from(".strata/trail")
}

const fn default_trail_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// libSQL database file. `:memory:` opens a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,

    /// Directory receiving one `{project_id}.jsonl` trail file per project.
    #[serde(default = "default_trail_dir")]
    pub trail_dir: String,

    /// Whether recorded decisions are appended to the governance trail.
    #[serde(default = "default_trail_enabled")]
    pub trail_enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            trail_dir: default_trail_dir(),
            trail_enabled: default_trail_enabled(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
