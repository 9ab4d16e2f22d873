//! SQL-backed persistence and relationship queries for catalog entities.
//!
//! # Responsibility
//! - Implement insert-or-update `save`, lookups, relationship traversal and
//!   aggregate queries as inherent methods on the model types.
//! - Keep every SQL statement inside this module tree.
//!
//! # Invariants
//! - Each public operation acquires one connection from the provider and
//!   drops it before returning, on success and on error.
//! - Rows read back are re-validated; invalid stored rows surface as
//!   `RepoError::InvalidData` instead of being masked.
//! - Collections come back in a deterministic order (id ascending unless
//!   documented otherwise).

use crate::db::DbError;
use crate::model::validation::ValidationError;
use log::debug;
use rusqlite::{Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod author_repo;
pub mod magazine_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Entity field contract rejected a value.
    Validation(ValidationError),
    /// Storage failure, passed through from SQLite untranslated.
    Db(DbError),
    /// `save` targeted an id whose row no longer exists.
    NotFound { entity: &'static str, id: i64 },
    /// Operation needs a storage id the entity does not have yet.
    Unsaved(&'static str),
    /// A stored row violates the entity field contract.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Unsaved(entity) => write!(f, "{entity} must be saved first"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Unsaved(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

fn query_one<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => Ok(Some(parse(row)?)),
        None => Ok(None),
    }
}

fn invalid_row(table: &str, id: i64, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("{table}.id={id}: {err}"))
}

fn log_save(entity: &str, mode: &str, id: i64) {
    debug!("event=entity_save module=repo status=ok entity={entity} mode={mode} id={id}");
}
