//! Core catalog logic for Masthead: authors, magazines and their articles
//! persisted in SQLite.
//! This crate is the single source of truth for entity field contracts.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::seed::{is_empty, seed_sample_data, SeedSummary};
pub use db::{ConnectionProvider, DbError, DbResult, SqliteProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{Article, ArticleId};
pub use model::author::{Author, AuthorId};
pub use model::magazine::{Magazine, MagazineId};
pub use model::validation::ValidationError;
pub use repo::magazine_repo::{MagazineArticleCount, CONTRIBUTING_AUTHOR_MIN_ARTICLES};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
