//! Catalog domain model: authors, magazines and the articles linking them.
//!
//! # Responsibility
//! - Define the entity value types and their field contracts.
//! - Reject out-of-contract values at construction and on every setter.
//!
//! # Invariants
//! - A constructed entity always satisfies its field contract.
//! - `id` is `None` until storage assigns one on first save, then never changes.
//! - Entities hold no relationship cache; traversal lives in `crate::repo`.

pub mod article;
pub mod author;
pub mod magazine;
pub mod validation;
