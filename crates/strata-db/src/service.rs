//! Service layer orchestrating store mutations with audit and trail.
//!
//! `StrataService` wraps `StrataDb` (raw database access), `TrailWriter`
//! (JSONL governance trail), and the process-wide `LearnedScorer`. All
//! repo and recorder methods are implemented as `impl StrataService`.

use std::path::PathBuf;

use strata_risk::LearnedScorer;

use crate::StrataDb;
use crate::error::DatabaseError;
use crate::trail::writer::TrailWriter;

/// Orchestrates store mutations with audit trail and governance trail.
///
/// Every mutation follows this protocol:
/// 1. Resolve referenced entities (NotFound before any write)
/// 2. Begin a gated write transaction
/// 3. Execute SQL and append audit entries inside the transaction
/// 4. Commit
/// 5. Append the governance trail line, for recordings only
pub struct StrataService {
    db: StrataDb,
    trail: TrailWriter,
    learned: LearnedScorer,
}

impl StrataService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `trail_dir` - Directory for JSONL trail files. `None` disables the trail.
    /// * `learned` - The loaded learned scorer, shared read-only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the trail
    /// directory cannot be created.
    pub async fn new_local(
        db_path: &str,
        trail_dir: Option<PathBuf>,
        learned: LearnedScorer,
    ) -> Result<Self, DatabaseError> {
        let db = StrataDb::open_local(db_path).await?;
        let trail = match trail_dir {
            Some(dir) => TrailWriter::new(dir)?,
            None => TrailWriter::disabled(),
        };
        Ok(Self { db, trail, learned })
    }

    /// Create from an existing `StrataDb`.
    #[must_use]
    pub const fn from_db(db: StrataDb, trail: TrailWriter, learned: LearnedScorer) -> Self {
        Self { db, trail, learned }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &StrataDb {
        &self.db
    }

    /// Access the trail writer.
    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    /// Access the learned scorer.
    #[must_use]
    pub const fn learned(&self) -> &LearnedScorer {
        &self.learned
    }
}
