//! Author persistence, relationship traversal and ranking.
//!
//! # Invariants
//! - `top_author` ranks by article count, ties go to the lowest id, and
//!   authors without articles still rank (count 0).

use super::{invalid_row, log_save, query_all, query_one, RepoError, RepoResult};
use crate::db::ConnectionProvider;
use crate::model::article::Article;
use crate::model::author::{Author, AuthorId};
use crate::model::magazine::Magazine;
use crate::repo::magazine_repo::parse_magazine_row;
use rusqlite::{params, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT authors.id AS id, authors.name AS name FROM authors";

impl Author {
    /// Inserts on first call, updates the stored row afterwards.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when the stored row vanished before update.
    pub fn save<P: ConnectionProvider + ?Sized>(&mut self, db: &P) -> RepoResult<&mut Self> {
        let conn = db.get_connection()?;
        match self.id() {
            None => {
                conn.execute("INSERT INTO authors (name) VALUES (?1);", [self.name()])?;
                let id = conn.last_insert_rowid();
                self.assign_id(id);
                log_save("author", "insert", id);
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE authors SET name = ?1 WHERE id = ?2;",
                    params![self.name(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "author",
                        id,
                    });
                }
                log_save("author", "update", id);
            }
        }
        Ok(self)
    }

    pub fn find_by_id<P: ConnectionProvider + ?Sized>(
        db: &P,
        id: AuthorId,
    ) -> RepoResult<Option<Author>> {
        let conn = db.get_connection()?;
        query_one(
            &conn,
            &format!("{AUTHOR_SELECT_SQL} WHERE authors.id = ?1;"),
            [id],
            parse_author_row,
        )
    }

    /// Returns the lowest-id author with exactly this name.
    pub fn find_by_name<P: ConnectionProvider + ?Sized>(
        db: &P,
        name: &str,
    ) -> RepoResult<Option<Author>> {
        let conn = db.get_connection()?;
        query_one(
            &conn,
            &format!("{AUTHOR_SELECT_SQL} WHERE authors.name = ?1 ORDER BY authors.id ASC LIMIT 1;"),
            [name],
            parse_author_row,
        )
    }

    /// Lists every author by id.
    pub fn all<P: ConnectionProvider + ?Sized>(db: &P) -> RepoResult<Vec<Author>> {
        let conn = db.get_connection()?;
        query_all(
            &conn,
            &format!("{AUTHOR_SELECT_SQL} ORDER BY authors.id ASC;"),
            [],
            parse_author_row,
        )
    }

    /// Articles written by this author, oldest first.
    pub fn articles<P: ConnectionProvider + ?Sized>(&self, db: &P) -> RepoResult<Vec<Article>> {
        match self.id() {
            Some(id) => Article::find_by_author(db, id),
            None => Ok(Vec::new()),
        }
    }

    /// Distinct magazines this author has published in.
    pub fn magazines<P: ConnectionProvider + ?Sized>(&self, db: &P) -> RepoResult<Vec<Magazine>> {
        let Some(id) = self.id() else {
            return Ok(Vec::new());
        };
        let conn = db.get_connection()?;
        query_all(
            &conn,
            "SELECT DISTINCT
                magazines.id AS id,
                magazines.name AS name,
                magazines.category AS category
             FROM magazines
             INNER JOIN articles ON articles.magazine_id = magazines.id
             WHERE articles.author_id = ?1
             ORDER BY magazines.id ASC;",
            [id],
            parse_magazine_row,
        )
    }

    /// Writes a new article by this author into `magazine`.
    ///
    /// # Errors
    /// - `RepoError::Unsaved` when this author or `magazine` has no id yet.
    /// - `RepoError::Validation` when `title` is shorter than 5 characters.
    pub fn add_article<P: ConnectionProvider + ?Sized>(
        &self,
        db: &P,
        magazine: &Magazine,
        title: impl Into<String>,
    ) -> RepoResult<Article> {
        let author_id = self.id().ok_or(RepoError::Unsaved("author"))?;
        let magazine_id = magazine.id().ok_or(RepoError::Unsaved("magazine"))?;
        let mut article = Article::new(title, author_id, magazine_id)?;
        article.save(db)?;
        Ok(article)
    }

    /// Distinct categories of the magazines this author wrote for, sorted.
    pub fn topic_areas<P: ConnectionProvider + ?Sized>(&self, db: &P) -> RepoResult<Vec<String>> {
        let Some(id) = self.id() else {
            return Ok(Vec::new());
        };
        let conn = db.get_connection()?;
        query_all(
            &conn,
            "SELECT DISTINCT magazines.category AS category
             FROM magazines
             INNER JOIN articles ON articles.magazine_id = magazines.id
             WHERE articles.author_id = ?1
             ORDER BY magazines.category ASC;",
            [id],
            |row| Ok(row.get("category")?),
        )
    }

    /// Author with the most articles; `None` only when no authors exist.
    pub fn top_author<P: ConnectionProvider + ?Sized>(db: &P) -> RepoResult<Option<Author>> {
        let conn = db.get_connection()?;
        query_one(
            &conn,
            "SELECT authors.id AS id, authors.name AS name, COUNT(articles.id) AS article_count
             FROM authors
             LEFT JOIN articles ON articles.author_id = authors.id
             GROUP BY authors.id
             ORDER BY article_count DESC, authors.id ASC
             LIMIT 1;",
            [],
            parse_author_row,
        )
    }
}

pub(crate) fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    Author::from_parts(Some(id), row.get("name")?).map_err(|err| invalid_row("authors", id, err))
}
