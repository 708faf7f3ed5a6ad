//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to per-project
//! `.strata/trail/{project_id}.jsonl` files. Uses
//! `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use strata_core::trail::TrailOperation;

use crate::error::DatabaseError;

/// Appends trail operations to per-project JSONL files.
#[derive(Debug)]
pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a new `TrailWriter` pointing at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&trail_dir).map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// Create a disabled writer (for testing or when trail is not needed).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    /// Whether trail writing is currently enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Path of the trail file for one project.
    #[must_use]
    pub fn project_file(&self, project_id: &str) -> PathBuf {
        self.trail_dir.join(format!("{project_id}.jsonl"))
    }

    /// Append a trail operation to the project's JSONL file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), DatabaseError> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.project_file(&op.project_id);
        serde_jsonlines::append_json_lines(&path, [op])
            .map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(())
    }

    /// Read every operation recorded for a project. A missing file is empty.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file exists but cannot be parsed.
    pub fn read_project(&self, project_id: &str) -> Result<Vec<TrailOperation>, DatabaseError> {
        let path = self.project_file(project_id);
        if !self.enabled || !path.exists() {
            return Ok(Vec::new());
        }
        let lines = serde_jsonlines::json_lines::<TrailOperation, _>(&path)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        lines
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| DatabaseError::Other(e.into()))
    }

    /// The directory where trail files are stored.
    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }
}
