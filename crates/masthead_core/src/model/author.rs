//! Author domain model.
//!
//! # Invariants
//! - `name` is 1..=100 characters after construction and after every
//!   successful `set_name`.

use super::validation::{LengthRule, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned author identity.
pub type AuthorId = i64;

const NAME_RULE: LengthRule = LengthRule::bounded("name", 1, 100);

/// A contributor who writes articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorFields")]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
}

// No `id`: a decoded payload is always an unsaved entity.
#[derive(Deserialize)]
struct AuthorFields {
    name: String,
}

impl TryFrom<AuthorFields> for Author {
    type Error = ValidationError;

    fn try_from(value: AuthorFields) -> Result<Self, Self::Error> {
        Self::from_parts(None, value.name)
    }
}

impl Author {
    /// Creates an unsaved author.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::from_parts(None, name.into())
    }

    pub(crate) fn from_parts(id: Option<AuthorId>, name: String) -> Result<Self, ValidationError> {
        NAME_RULE.check(&name)?;
        Ok(Self { id, name })
    }

    /// Storage id, `None` until the first `save`.
    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name; on error the previous name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        NAME_RULE.check(&name)?;
        self.name = name;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: AuthorId) {
        debug_assert!(self.id.is_none(), "author id is assigned once");
        self.id = Some(id);
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        write!(f, "Author(id={id}, name='{}')", self.name)
    }
}
