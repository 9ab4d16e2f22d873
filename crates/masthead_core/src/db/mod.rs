//! SQLite storage access for Masthead core.
//!
//! # Responsibility
//! - Hand out short-lived, configured SQLite connections to entity queries.
//! - Bootstrap and verify the `authors`/`magazines`/`articles` schema.
//! - Seed a fixed sample catalog for local inspection.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys=ON` and a busy timeout.
//! - Entity code never opens connections directly; it goes through
//!   [`ConnectionProvider`].

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod provider;
pub mod schema;
pub mod seed;

pub use open::{open_connection, DEFAULT_BUSY_TIMEOUT};
pub use provider::{ConnectionProvider, SqliteProvider};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Required table is missing from an externally managed database.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "database is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "database is missing required column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
