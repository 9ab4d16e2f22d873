//! Schema bootstrap and readiness checks.
//!
//! # Responsibility
//! - Create the three catalog tables when they are missing.
//! - Verify externally created databases carry every column queries touch.
//!
//! # Invariants
//! - Bootstrap is idempotent; running it on a ready database changes nothing.
//! - There is no schema versioning. Shape changes belong to whoever owns the
//!   database file.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("authors", &["id", "name"]),
    ("magazines", &["id", "name", "category"]),
    ("articles", &["id", "title", "author_id", "magazine_id"]),
];

/// Creates catalog tables and indexes if they do not exist yet.
pub fn bootstrap_schema(conn: &Connection) -> DbResult<()> {
    if let Err(err) = conn.execute_batch(SCHEMA_SQL) {
        error!(
            "event=schema_bootstrap module=db status=error error_code=schema_create_failed error={}",
            err
        );
        return Err(err.into());
    }
    ensure_schema_ready(conn)?;
    info!("event=schema_bootstrap module=db status=ok");
    Ok(())
}

/// Checks that every table and column used by entity queries exists.
pub fn ensure_schema_ready(conn: &Connection) -> DbResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(DbError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get("name")?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
