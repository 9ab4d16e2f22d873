//! Connection provider contract and the file-backed SQLite provider.
//!
//! # Responsibility
//! - Define the single capability entity queries need: "give me a connection".
//! - Keep connection lifetime scoped to one entity operation.
//!
//! # Invariants
//! - Each `get_connection()` call returns an independent connection.
//! - Connections are closed when dropped, so every exit path releases them.

use super::open::{open_connection, DEFAULT_BUSY_TIMEOUT};
use super::schema::{bootstrap_schema, ensure_schema_ready};
use super::DbResult;
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Source of ready-to-use database connections.
pub trait ConnectionProvider {
    fn get_connection(&self) -> DbResult<Connection>;
}

/// Opens a fresh connection to one SQLite database file per call.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteProvider {
    /// Opens (creating if needed) the database file and bootstraps the schema.
    ///
    /// # Side effects
    /// - Creates missing tables and indexes.
    /// - Emits `schema_bootstrap` logging events.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let provider = Self::unchecked(path);
        let conn = provider.get_connection()?;
        bootstrap_schema(&conn)?;
        info!(
            "event=provider_open module=db status=ok mode=bootstrap path={}",
            provider.path.display()
        );
        Ok(provider)
    }

    /// Connects to a database whose schema is managed elsewhere.
    ///
    /// # Errors
    /// - Returns `MissingRequiredTable`/`MissingRequiredColumn` when the
    ///   schema does not carry what entity queries read and write.
    pub fn connect_existing(path: impl AsRef<Path>) -> DbResult<Self> {
        let provider = Self::unchecked(path);
        let conn = provider.get_connection()?;
        ensure_schema_ready(&conn)?;
        info!(
            "event=provider_open module=db status=ok mode=existing path={}",
            provider.path.display()
        );
        Ok(provider)
    }

    /// Overrides how long a connection waits on a locked database.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    fn unchecked(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl ConnectionProvider for SqliteProvider {
    fn get_connection(&self) -> DbResult<Connection> {
        open_connection(&self.path, self.busy_timeout)
    }
}
