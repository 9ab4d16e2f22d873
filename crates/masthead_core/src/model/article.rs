//! Article domain model.
//!
//! An article is the join between one author and one magazine. Foreign keys
//! are plain ids; resolving them is a storage round-trip (see
//! `crate::repo::article_repo`).
//!
//! # Invariants
//! - `title` is at least 5 characters after construction and after every
//!   successful `set_title`.

use super::author::AuthorId;
use super::magazine::MagazineId;
use super::validation::{LengthRule, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned article identity.
pub type ArticleId = i64;

const TITLE_RULE: LengthRule = LengthRule::at_least("title", 5);

/// A single published piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArticleFields")]
pub struct Article {
    id: Option<ArticleId>,
    title: String,
    /// Owning author. Not checked against storage until save.
    pub author_id: AuthorId,
    /// Owning magazine. Not checked against storage until save.
    pub magazine_id: MagazineId,
}

// No `id`: a decoded payload is always an unsaved entity.
#[derive(Deserialize)]
struct ArticleFields {
    title: String,
    author_id: AuthorId,
    magazine_id: MagazineId,
}

impl TryFrom<ArticleFields> for Article {
    type Error = ValidationError;

    fn try_from(value: ArticleFields) -> Result<Self, Self::Error> {
        Self::from_parts(None, value.title, value.author_id, value.magazine_id)
    }
}

impl Article {
    /// Creates an unsaved article.
    pub fn new(
        title: impl Into<String>,
        author_id: AuthorId,
        magazine_id: MagazineId,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(None, title.into(), author_id, magazine_id)
    }

    pub(crate) fn from_parts(
        id: Option<ArticleId>,
        title: String,
        author_id: AuthorId,
        magazine_id: MagazineId,
    ) -> Result<Self, ValidationError> {
        TITLE_RULE.check(&title)?;
        Ok(Self {
            id,
            title,
            author_id,
            magazine_id,
        })
    }

    /// Storage id, `None` until the first `save`.
    pub fn id(&self) -> Option<ArticleId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title; on error the previous title is kept.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        TITLE_RULE.check(&title)?;
        self.title = title;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: ArticleId) {
        debug_assert!(self.id.is_none(), "article id is assigned once");
        self.id = Some(id);
    }
}

impl Display for Article {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        write!(
            f,
            "Article(id={id}, title='{}', author_id={}, magazine_id={})",
            self.title, self.author_id, self.magazine_id
        )
    }
}
