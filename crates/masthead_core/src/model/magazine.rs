//! Magazine domain model.
//!
//! # Invariants
//! - `name` is 1..=100 characters and `category` is 1..=50 characters after
//!   construction and after every successful setter call.

use super::validation::{LengthRule, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned magazine identity.
pub type MagazineId = i64;

const NAME_RULE: LengthRule = LengthRule::bounded("name", 1, 100);
const CATEGORY_RULE: LengthRule = LengthRule::bounded("category", 1, 50);

/// A publication that articles appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MagazineFields")]
pub struct Magazine {
    id: Option<MagazineId>,
    name: String,
    category: String,
}

// No `id`: a decoded payload is always an unsaved entity.
#[derive(Deserialize)]
struct MagazineFields {
    name: String,
    category: String,
}

impl TryFrom<MagazineFields> for Magazine {
    type Error = ValidationError;

    fn try_from(value: MagazineFields) -> Result<Self, Self::Error> {
        Self::from_parts(None, value.name, value.category)
    }
}

impl Magazine {
    /// Creates an unsaved magazine.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(None, name.into(), category.into())
    }

    pub(crate) fn from_parts(
        id: Option<MagazineId>,
        name: String,
        category: String,
    ) -> Result<Self, ValidationError> {
        NAME_RULE.check(&name)?;
        CATEGORY_RULE.check(&category)?;
        Ok(Self { id, name, category })
    }

    /// Storage id, `None` until the first `save`.
    pub fn id(&self) -> Option<MagazineId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Replaces the name; on error the previous name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        NAME_RULE.check(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the category; on error the previous category is kept.
    pub fn set_category(&mut self, category: impl Into<String>) -> Result<(), ValidationError> {
        let category = category.into();
        CATEGORY_RULE.check(&category)?;
        self.category = category;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: MagazineId) {
        debug_assert!(self.id.is_none(), "magazine id is assigned once");
        self.id = Some(id);
    }
}

impl Display for Magazine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        write!(
            f,
            "Magazine(id={id}, name='{}', category='{}')",
            self.name, self.category
        )
    }
}
