//! Magazine persistence, relationship traversal and aggregate reports.
//!
//! # Invariants
//! - `contributing_authors` keeps only authors with at least
//!   [`CONTRIBUTING_AUTHOR_MIN_ARTICLES`] articles in the magazine.
//! - `top_publisher` ranks by article count, ties go to the lowest id.
//! - `article_counts` includes magazines without articles (count 0).

use super::author_repo::parse_author_row;
use super::{invalid_row, log_save, query_all, query_one, RepoError, RepoResult};
use crate::db::ConnectionProvider;
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::magazine::{Magazine, MagazineId};
use rusqlite::{params, Row};
use serde::Serialize;

/// Articles an author needs in one magazine to count as a contributing
/// author there (more than two).
pub const CONTRIBUTING_AUTHOR_MIN_ARTICLES: i64 = 3;

const MAGAZINE_SELECT_SQL: &str = "SELECT
    magazines.id AS id,
    magazines.name AS name,
    magazines.category AS category
FROM magazines";

/// Per-magazine article tally returned by [`Magazine::article_counts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagazineArticleCount {
    pub id: MagazineId,
    pub name: String,
    pub category: String,
    pub article_count: u64,
}

impl Magazine {
    /// Inserts on first call, updates the stored row afterwards.
    ///
    /// The storage id is always written back after insert.
    pub fn save<P: ConnectionProvider + ?Sized>(&mut self, db: &P) -> RepoResult<&mut Self> {
        let conn = db.get_connection()?;
        match self.id() {
            None => {
                conn.execute(
                    "INSERT INTO magazines (name, category) VALUES (?1, ?2);",
                    params![self.name(), self.category()],
                )?;
                let id = conn.last_insert_rowid();
                self.assign_id(id);
                log_save("magazine", "insert", id);
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE magazines SET name = ?1, category = ?2 WHERE id = ?3;",
                    params![self.name(), self.category(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "magazine",
                        id,
                    });
                }
                log_save("magazine", "update", id);
            }
        }
        Ok(self)
    }

    pub fn find_by_id<P: ConnectionProvider + ?Sized>(
        db: &P,
        id: MagazineId,
    ) -> RepoResult<Option<Magazine>> {
        let conn = db.get_connection()?;
        query_one(
            &conn,
            &format!("{MAGAZINE_SELECT_SQL} WHERE magazines.id = ?1;"),
            [id],
            parse_magazine_row,
        )
    }

    pub fn find_by_name<P: ConnectionProvider + ?Sized>(
        db: &P,
        name: &str,
    ) -> RepoResult<Vec<Magazine>> {
        Self::find_where(db, "magazines.name = ?1", name)
    }

    pub fn find_by_category<P: ConnectionProvider + ?Sized>(
        db: &P,
        category: &str,
    ) -> RepoResult<Vec<Magazine>> {
        Self::find_where(db, "magazines.category = ?1", category)
    }

    /// Lists every magazine by id.
    pub fn all<P: ConnectionProvider + ?Sized>(db: &P) -> RepoResult<Vec<Magazine>> {
        let conn = db.get_connection()?;
        query_all(
            &conn,
            &format!("{MAGAZINE_SELECT_SQL} ORDER BY magazines.id ASC;"),
            [],
            parse_magazine_row,
        )
    }

    /// Articles published in this magazine, oldest first.
    pub fn articles<P: ConnectionProvider + ?Sized>(&self, db: &P) -> RepoResult<Vec<Article>> {
        match self.id() {
            Some(id) => Article::find_by_magazine(db, id),
            None => Ok(Vec::new()),
        }
    }

    /// Distinct authors who have published here.
    pub fn contributors<P: ConnectionProvider + ?Sized>(&self, db: &P) -> RepoResult<Vec<Author>> {
        let Some(id) = self.id() else {
            return Ok(Vec::new());
        };
        let conn = db.get_connection()?;
        query_all(
            &conn,
            "SELECT DISTINCT authors.id AS id, authors.name AS name
             FROM authors
             INNER JOIN articles ON articles.author_id = authors.id
             WHERE articles.magazine_id = ?1
             ORDER BY authors.id ASC;",
            [id],
            parse_author_row,
        )
    }

    /// Titles of [`Magazine::articles`], same order.
    pub fn article_titles<P: ConnectionProvider + ?Sized>(
        &self,
        db: &P,
    ) -> RepoResult<Vec<String>> {
        Ok(self
            .articles(db)?
            .into_iter()
            .map(|article| article.title().to_string())
            .collect())
    }

    /// Authors with more than two articles in this magazine.
    pub fn contributing_authors<P: ConnectionProvider + ?Sized>(
        &self,
        db: &P,
    ) -> RepoResult<Vec<Author>> {
        let Some(id) = self.id() else {
            return Ok(Vec::new());
        };
        let conn = db.get_connection()?;
        query_all(
            &conn,
            "SELECT authors.id AS id, authors.name AS name
             FROM authors
             INNER JOIN articles ON articles.author_id = authors.id
             WHERE articles.magazine_id = ?1
             GROUP BY authors.id
             HAVING COUNT(articles.id) >= ?2
             ORDER BY authors.id ASC;",
            params![id, CONTRIBUTING_AUTHOR_MIN_ARTICLES],
            parse_author_row,
        )
    }

    /// Magazines whose articles come from more than one distinct author.
    pub fn with_multiple_authors<P: ConnectionProvider + ?Sized>(
        db: &P,
    ) -> RepoResult<Vec<Magazine>> {
        let conn = db.get_connection()?;
        query_all(
            &conn,
            "SELECT magazines.id AS id, magazines.name AS name, magazines.category AS category
             FROM magazines
             INNER JOIN articles ON articles.magazine_id = magazines.id
             GROUP BY magazines.id
             HAVING COUNT(DISTINCT articles.author_id) > 1
             ORDER BY magazines.id ASC;",
            [],
            parse_magazine_row,
        )
    }

    /// Magazine with the most articles; `None` only when no magazines exist.
    pub fn top_publisher<P: ConnectionProvider + ?Sized>(db: &P) -> RepoResult<Option<Magazine>> {
        let conn = db.get_connection()?;
        query_one(
            &conn,
            "SELECT
                magazines.id AS id,
                magazines.name AS name,
                magazines.category AS category,
                COUNT(articles.id) AS article_count
             FROM magazines
             LEFT JOIN articles ON articles.magazine_id = magazines.id
             GROUP BY magazines.id
             ORDER BY article_count DESC, magazines.id ASC
             LIMIT 1;",
            [],
            parse_magazine_row,
        )
    }

    /// Article tally for every magazine, by id.
    pub fn article_counts<P: ConnectionProvider + ?Sized>(
        db: &P,
    ) -> RepoResult<Vec<MagazineArticleCount>> {
        let conn = db.get_connection()?;
        query_all(
            &conn,
            "SELECT
                magazines.id AS id,
                magazines.name AS name,
                magazines.category AS category,
                COUNT(articles.id) AS article_count
             FROM magazines
             LEFT JOIN articles ON articles.magazine_id = magazines.id
             GROUP BY magazines.id
             ORDER BY magazines.id ASC;",
            [],
            parse_article_count_row,
        )
    }

    fn find_where<P: ConnectionProvider + ?Sized>(
        db: &P,
        predicate: &str,
        value: &str,
    ) -> RepoResult<Vec<Magazine>> {
        let conn = db.get_connection()?;
        query_all(
            &conn,
            &format!("{MAGAZINE_SELECT_SQL} WHERE {predicate} ORDER BY magazines.id ASC;"),
            [value],
            parse_magazine_row,
        )
    }
}

pub(crate) fn parse_magazine_row(row: &Row<'_>) -> RepoResult<Magazine> {
    let id: MagazineId = row.get("id")?;
    Magazine::from_parts(Some(id), row.get("name")?, row.get("category")?)
        .map_err(|err| invalid_row("magazines", id, err))
}

fn parse_article_count_row(row: &Row<'_>) -> RepoResult<MagazineArticleCount> {
    let id: MagazineId = row.get("id")?;
    let count: i64 = row.get("article_count")?;
    let article_count = u64::try_from(count).map_err(|_| {
        RepoError::InvalidData(format!("negative article count {count} for magazines.id={id}"))
    })?;
    Ok(MagazineArticleCount {
        id,
        name: row.get("name")?,
        category: row.get("category")?,
        article_count,
    })
}
