//! Fixed sample catalog for local inspection and demos.
//!
//! All rows go through the entity `save` paths, so seeding exercises the same
//! validation and SQL as callers do.

use super::ConnectionProvider;
use crate::model::author::Author;
use crate::model::magazine::Magazine;
use crate::repo::RepoResult;
use log::info;
use serde::Serialize;

const SAMPLE_AUTHORS: &[&str] = &["Jane Doe", "John Smith", "Amara Okafor"];

const SAMPLE_MAGAZINES: &[(&str, &str)] = &[
    ("Tech Today", "Technology"),
    ("Design Weekly", "Design"),
    ("Science Monthly", "Science"),
];

/// `(author index, magazine index, title)` into the tables above.
const SAMPLE_ARTICLES: &[(usize, usize, &str)] = &[
    (0, 0, "Intro to Systems"),
    (0, 0, "Memory Safety in Practice"),
    (0, 0, "Scaling SQLite"),
    (0, 2, "Quantum Basics"),
    (1, 0, "Rust for Beginners"),
    (1, 1, "Typography Matters"),
    (2, 2, "Coral Reef Futures"),
];

/// Row counts written by [`seed_sample_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub authors: usize,
    pub magazines: usize,
    pub articles: usize,
}

/// Returns whether the catalog has no authors yet.
pub fn is_empty<P: ConnectionProvider + ?Sized>(db: &P) -> RepoResult<bool> {
    let conn = db.get_connection()?;
    let exists: i64 =
        conn.query_row("SELECT EXISTS(SELECT 1 FROM authors);", [], |row| row.get(0))?;
    Ok(exists == 0)
}

/// Inserts the sample catalog. Not idempotent; check [`is_empty`] first.
pub fn seed_sample_data<P: ConnectionProvider + ?Sized>(db: &P) -> RepoResult<SeedSummary> {
    let mut authors = Vec::with_capacity(SAMPLE_AUTHORS.len());
    for name in SAMPLE_AUTHORS {
        let mut author = Author::new(*name)?;
        author.save(db)?;
        authors.push(author);
    }

    let mut magazines = Vec::with_capacity(SAMPLE_MAGAZINES.len());
    for (name, category) in SAMPLE_MAGAZINES {
        let mut magazine = Magazine::new(*name, *category)?;
        magazine.save(db)?;
        magazines.push(magazine);
    }

    for &(author_index, magazine_index, title) in SAMPLE_ARTICLES {
        authors[author_index].add_article(db, &magazines[magazine_index], title)?;
    }

    let summary = SeedSummary {
        authors: authors.len(),
        magazines: magazines.len(),
        articles: SAMPLE_ARTICLES.len(),
    };
    info!(
        "event=seed module=db status=ok authors={} magazines={} articles={}",
        summary.authors, summary.magazines, summary.articles
    );
    Ok(summary)
}
