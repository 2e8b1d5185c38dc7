//! CLI administration tool for link-shortener.
//!
//! Works directly against the PostgreSQL store, without the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (reuses the existing code if the URL is known)
//! cargo run --bin admin -- shorten https://example.com/a
//!
//! # Show a code's record and click count
//! cargo run --bin admin -- stats aB3xY9
//!
//! # List the most recent short URLs
//! cargo run --bin admin -- recent --limit 10
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use link_shortener::application::services::{DEFAULT_RECENT_LIMIT, ShortenerService};
use link_shortener::domain::entities::UrlRecord;
use link_shortener::infrastructure::cache::NullCache;
use link_shortener::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// Absolute URL to shorten
        url: String,
    },

    /// Show the record and click count for a short code
    Stats {
        /// Short code
        code: String,
    },

    /// List the most recently created short URLs
    Recent {
        /// Number of records to show
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    if let Commands::Db { action } = &cli.command {
        return handle_db_action(action, &pool).await;
    }

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    // The CLI never redirects, so nothing is ever queued on this channel.
    let (click_tx, _click_rx) = mpsc::channel(1);
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let service = ShortenerService::new(repository, Arc::new(NullCache::new()), click_tx);

    match cli.command {
        Commands::Shorten { url } => {
            let record = service
                .create_or_reuse(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;
            println!("{}", "Short URL ready".green().bold());
            print_record(&record);
        }
        Commands::Stats { code } => {
            let record = service
                .get_stats(&code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            print_record(&record);
        }
        Commands::Recent { limit } => {
            let records = service
                .list_recent(limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list records: {}", e))?;

            if records.is_empty() {
                println!("{}", "No short URLs yet".yellow());
            }
            for record in &records {
                println!(
                    "{}  {:>6} clicks  {}  {}",
                    record.short_code.bright_yellow().bold(),
                    record.clicks,
                    record.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    record.original_url.cyan()
                );
            }
        }
        Commands::Db { .. } => {}
    }

    Ok(())
}

fn print_record(record: &UrlRecord) {
    println!("  Code:     {}", record.short_code.bright_yellow().bold());
    println!("  URL:      {}", record.original_url.cyan());
    println!("  Created:  {}", record.created_at.to_rfc3339());
    println!("  Clicks:   {}", record.clicks.to_string().bright_white());
}

async fn handle_db_action(action: &DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "Database connection OK".green().bold());
            println!("  {}", version.dimmed());
        }
    }

    Ok(())
}
