//! Article persistence, lookups and foreign-key resolution.

use super::{invalid_row, log_save, query_all, query_one, RepoError, RepoResult};
use crate::db::ConnectionProvider;
use crate::model::article::{Article, ArticleId};
use crate::model::author::{Author, AuthorId};
use crate::model::magazine::{Magazine, MagazineId};
use rusqlite::{params, Row};

const ARTICLE_SELECT_SQL: &str = "SELECT
    articles.id AS id,
    articles.title AS title,
    articles.author_id AS author_id,
    articles.magazine_id AS magazine_id
FROM articles";

impl Article {
    /// Inserts on first call, updates the stored row afterwards.
    ///
    /// Dangling `author_id`/`magazine_id` values are rejected by SQLite's
    /// foreign key enforcement and come back as `RepoError::Db`.
    pub fn save<P: ConnectionProvider + ?Sized>(&mut self, db: &P) -> RepoResult<&mut Self> {
        let conn = db.get_connection()?;
        match self.id() {
            None => {
                conn.execute(
                    "INSERT INTO articles (title, author_id, magazine_id) VALUES (?1, ?2, ?3);",
                    params![self.title(), self.author_id, self.magazine_id],
                )?;
                let id = conn.last_insert_rowid();
                self.assign_id(id);
                log_save("article", "insert", id);
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE articles
                     SET
                        title = ?1,
                        author_id = ?2,
                        magazine_id = ?3
                     WHERE id = ?4;",
                    params![self.title(), self.author_id, self.magazine_id, id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "article",
                        id,
                    });
                }
                log_save("article", "update", id);
            }
        }
        Ok(self)
    }

    pub fn find_by_id<P: ConnectionProvider + ?Sized>(
        db: &P,
        id: ArticleId,
    ) -> RepoResult<Option<Article>> {
        let conn = db.get_connection()?;
        query_one(
            &conn,
            &format!("{ARTICLE_SELECT_SQL} WHERE articles.id = ?1;"),
            [id],
            parse_article_row,
        )
    }

    /// Titles are not unique, so every exact match is returned.
    pub fn find_by_title<P: ConnectionProvider + ?Sized>(
        db: &P,
        title: &str,
    ) -> RepoResult<Vec<Article>> {
        Self::find_where(db, "articles.title = ?1", title)
    }

    pub fn find_by_author<P: ConnectionProvider + ?Sized>(
        db: &P,
        author_id: AuthorId,
    ) -> RepoResult<Vec<Article>> {
        Self::find_where(db, "articles.author_id = ?1", author_id)
    }

    pub fn find_by_magazine<P: ConnectionProvider + ?Sized>(
        db: &P,
        magazine_id: MagazineId,
    ) -> RepoResult<Vec<Article>> {
        Self::find_where(db, "articles.magazine_id = ?1", magazine_id)
    }

    /// Resolves the owning author; `None` when the row is gone.
    pub fn author<P: ConnectionProvider + ?Sized>(&self, db: &P) -> RepoResult<Option<Author>> {
        Author::find_by_id(db, self.author_id)
    }

    /// Resolves the owning magazine; `None` when the row is gone.
    pub fn magazine<P: ConnectionProvider + ?Sized>(
        &self,
        db: &P,
    ) -> RepoResult<Option<Magazine>> {
        Magazine::find_by_id(db, self.magazine_id)
    }

    fn find_where<P, V>(db: &P, predicate: &str, value: V) -> RepoResult<Vec<Article>>
    where
        P: ConnectionProvider + ?Sized,
        V: rusqlite::ToSql,
    {
        let conn = db.get_connection()?;
        query_all(
            &conn,
            &format!("{ARTICLE_SELECT_SQL} WHERE {predicate} ORDER BY articles.id ASC;"),
            [value],
            parse_article_row,
        )
    }
}

pub(crate) fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let id: ArticleId = row.get("id")?;
    Article::from_parts(
        Some(id),
        row.get("title")?,
        row.get("author_id")?,
        row.get("magazine_id")?,
    )
    .map_err(|err| invalid_row("articles", id, err))
}
