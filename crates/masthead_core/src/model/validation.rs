//! Field-length contracts shared by all entities.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected field value on construction or mutation of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty.
    Empty { field: &'static str },
    /// Text field is shorter than its minimum length.
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },
    /// Text field exceeds its maximum length.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooShort { field, min, actual } => write!(
                f,
                "{field} must be at least {min} characters, got {actual}"
            ),
            Self::TooLong { field, max, actual } => write!(
                f,
                "{field} must be at most {max} characters, got {actual}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Inclusive length bounds, counted in Unicode scalar values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LengthRule {
    pub field: &'static str,
    pub min: usize,
    pub max: Option<usize>,
}

impl LengthRule {
    pub(crate) const fn bounded(field: &'static str, min: usize, max: usize) -> Self {
        Self {
            field,
            min,
            max: Some(max),
        }
    }

    pub(crate) const fn at_least(field: &'static str, min: usize) -> Self {
        Self {
            field,
            min,
            max: None,
        }
    }

    pub(crate) fn check(&self, value: &str) -> Result<(), ValidationError> {
        let actual = value.chars().count();
        if actual == 0 && self.min > 0 {
            return Err(ValidationError::Empty { field: self.field });
        }
        if actual < self.min {
            return Err(ValidationError::TooShort {
                field: self.field,
                min: self.min,
                actual,
            });
        }
        match self.max {
            Some(max) if actual > max => Err(ValidationError::TooLong {
                field: self.field,
                max,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LengthRule, ValidationError};

    #[test]
    fn counts_characters_not_bytes() {
        let rule = LengthRule::bounded("name", 1, 3);
        assert!(rule.check("żółw").is_err());
        assert!(rule.check("żół").is_ok());
    }

    #[test]
    fn empty_value_reports_empty_before_too_short() {
        let rule = LengthRule::at_least("title", 5);
        assert_eq!(
            rule.check("").unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
        assert_eq!(
            rule.check("abcd").unwrap_err(),
            ValidationError::TooShort {
                field: "title",
                min: 5,
                actual: 4
            }
        );
    }
}
