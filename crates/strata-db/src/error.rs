//! Database error types for strata-db.

use strata_core::enums::EntityType;
use thiserror::Error;

/// Errors from store and recorder operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A referenced entity does not exist. Nothing was written.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// An entity's parent link is dangling. The store is inconsistent and
    /// the operation was aborted before any write.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Asset storage or editing failed.
    #[error("Asset error: {0}")]
    Assets(#[from] strata_assets::AssetError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity_type: EntityType, id: &str) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Whether this error means "the caller asked for something absent".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
