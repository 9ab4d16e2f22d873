//! Masthead inspection CLI.
//!
//! # Responsibility
//! - Open (and bootstrap) a catalog database file.
//! - Seed the sample catalog on request and print entity/aggregate reports.
//!
//! All catalog logic lives in `masthead_core`; this binary only wires it up.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use masthead_core::{
    core_version, default_log_level, init_logging, is_empty, seed_sample_data, Author, Magazine,
    MagazineArticleCount, SqliteProvider,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "masthead",
    version = core_version(),
    about = "Inspect an author/magazine/article catalog stored in SQLite"
)]
struct Cli {
    /// SQLite database file; created and bootstrapped if missing
    #[arg(long, env = "MASTHEAD_DB", default_value = "masthead.sqlite3", global = true)]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "MASTHEAD_LOG_DIR", global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "MASTHEAD_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the sample catalog when the database has no authors
    Seed,
    /// List authors with their articles and topic areas
    Authors,
    /// List magazines with their contributors
    Magazines,
    /// Print aggregate rankings as JSON
    Report,
}

#[derive(Serialize)]
struct Report {
    top_author: Option<Author>,
    top_publisher: Option<Magazine>,
    with_multiple_authors: Vec<Magazine>,
    article_counts: Vec<MagazineArticleCount>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let db = SqliteProvider::open(&cli.db)
        .with_context(|| format!("failed to open database {}", cli.db.display()))?;
    info!(
        "event=cli_start module=cli status=ok core_version={} command={:?}",
        core_version(),
        cli.command
    );

    match cli.command {
        Commands::Seed => seed(&db),
        Commands::Authors => list_authors(&db),
        Commands::Magazines => list_magazines(&db),
        Commands::Report => report(&db),
    }
}

fn seed(db: &SqliteProvider) -> Result<()> {
    if !is_empty(db)? {
        println!("catalog already has data; nothing seeded");
        return Ok(());
    }
    let summary = seed_sample_data(db).context("failed to seed sample data")?;
    println!(
        "seeded {} authors, {} magazines, {} articles",
        summary.authors, summary.magazines, summary.articles
    );
    Ok(())
}

fn list_authors(db: &SqliteProvider) -> Result<()> {
    for author in Author::all(db)? {
        println!("{author}");
        println!("  topics: {}", author.topic_areas(db)?.join(", "));
        for article in author.articles(db)? {
            println!("  - {article}");
        }
    }
    Ok(())
}

fn list_magazines(db: &SqliteProvider) -> Result<()> {
    for magazine in Magazine::all(db)? {
        println!("{magazine}");
        let contributors: Vec<String> = magazine
            .contributors(db)?
            .iter()
            .map(|author| author.name().to_string())
            .collect();
        println!("  contributors: {}", contributors.join(", "));
        for title in magazine.article_titles(db)? {
            println!("  - {title}");
        }
    }
    Ok(())
}

fn report(db: &SqliteProvider) -> Result<()> {
    let report = Report {
        top_author: Author::top_author(db)?,
        top_publisher: Magazine::top_publisher(db)?,
        with_multiple_authors: Magazine::with_multiple_authors(db)?,
        article_counts: Magazine::article_counts(db)?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_flag_reports_core_version() {
        let command = Cli::command();
        assert_eq!(command.get_version(), Some(masthead_core::core_version()));
    }
}
