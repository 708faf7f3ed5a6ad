//! # strata-db
//!
//! libSQL entity store and decision recorder for Strata.
//!
//! Holds the project → zone → component → decision → risk event hierarchy
//! (plus external model records) with foreign-key cascades, an append-only
//! audit trail, and the per-project JSONL governance trail. The
//! [`recorder`] module scores a decision and persists the decision and its
//! risk event as one transaction. `seed_sample_data` fills an empty store
//! with a small sample hierarchy.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod recorder;
pub mod repos;
mod seed;
pub mod service;
pub mod trail;

#[cfg(test)]
mod test_support;

use std::ops::Deref;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Central database handle.
///
/// One connection is shared by every caller, so an open transaction is
/// visible to anything else using it. Access goes through a reader/writer
/// gate: [`StrataDb::begin_write`] holds the write side for the lifetime of
/// the transaction, and [`StrataDb::read`] holds the read side while a
/// query runs. Readers therefore only ever observe committed state.
pub struct StrataDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: RwLock<()>,
}

/// An open write transaction holding the write side of the gate.
///
/// Dereferences to the transaction's connection. Dropping it without
/// [`WriteTx::commit`] rolls the transaction back.
pub struct WriteTx<'a> {
    tx: libsql::Transaction,
    _gate: RwLockWriteGuard<'a, ()>,
}

/// The connection, borrowed for reading while no write transaction is open.
pub struct ReadConn<'a> {
    conn: &'a libsql::Connection,
    _gate: RwLockReadGuard<'a, ()>,
}

impl Deref for ReadConn<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        self.conn
    }
}

impl WriteTx<'_> {
    /// Commit and release the write gate.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Roll back and release the write gate. Failures are logged only.
    pub async fn rollback(self) {
        if let Err(error) = self.tx.rollback().await {
            tracing::warn!(%error, "rollback failed");
        }
    }
}

impl Deref for WriteTx<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl StrataDb {
    /// Open a local-only database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let strata_db = Self {
            db,
            conn,
            gate: RwLock::new(()),
        };
        strata_db.run_migrations().await?;
        tracing::debug!(path, "entity store opened");
        Ok(strata_db)
    }

    /// Access the underlying libSQL connection without taking the gate.
    ///
    /// Queries issued here can observe a concurrent, uncommitted write
    /// transaction. Repository reads use [`Self::read`] instead.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Wait until no write transaction is open and borrow the connection
    /// for reading. Hold the guard until the returned rows are consumed.
    pub async fn read(&self) -> ReadConn<'_> {
        ReadConn {
            conn: &self.conn,
            _gate: self.gate.read().await,
        }
    }

    /// Wait for the write side of the gate and open a transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN` fails.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let gate = self.gate.write().await;
        let tx = self.conn.transaction().await?;
        Ok(WriteTx { tx, _gate: gate })
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dec-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
