//! CLI administration tool for status-api.
//!
//! Provides commands for inspecting the database and the cache without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Create the table and seed it if empty
//! cargo run --bin admin -- db init
//!
//! # List subsidiaries straight from the database
//! cargo run --bin admin -- records
//!
//! # Show the cached status entry and its remaining TTL
//! cargo run --bin admin -- cache inspect
//!
//! # Run one cache-aside status read and show where it came from
//! cargo run --bin admin -- status
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `status_api::config`.

use status_api::application::services::STATUS_KEY;
use status_api::config::{self, Config};
use status_api::domain::repositories::StatusRepository;
use status_api::infrastructure::cache::RedisCache;
use status_api::infrastructure::persistence::{PgStatusRepository, schema};
use status_api::server::{build_cache, build_status_service};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing status-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// List subsidiaries from the database
    Records,

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Perform one status read through the cache
    Status,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply migrations and seed an empty table (with retry)
    Init,
}

/// Cache operation subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Show the raw cached value and its remaining TTL
    Inspect {
        /// Cache key to inspect
        #[arg(short, long, default_value = STATUS_KEY)]
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &config).await?,
        Commands::Records => list_records(&config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
        Commands::Status => run_status(&config).await?,
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = schema::connect_pool(config)
                .await
                .context("Failed to connect to database")?;
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Init => {
            println!("{}", "🛠  Initialising database...".bright_blue());

            let pool = schema::initialize(config).await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subsidiaries")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database ready".green().bold());
            println!("  Subsidiaries: {}", total.to_string().bright_white());
        }
    }

    Ok(())
}

/// Prints every subsidiary as a table.
async fn list_records(config: &Config) -> Result<()> {
    println!("{}", "📋 Subsidiaries".bright_blue().bold());
    println!();

    let pool = schema::connect_pool(config)
        .await
        .context("Failed to connect to database")?;
    let repo = PgStatusRepository::new(Arc::new(pool));
    let rows = repo.fetch_subsidiaries().await?;

    if rows.is_empty() {
        println!("{}", "  No subsidiaries found".yellow());
        println!();
        println!("  Run {} to seed the table", "admin db init".cyan());
        return Ok(());
    }

    println!(
        "  {:<6} {:<30} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for row in &rows {
        let status = if row.status.eq_ignore_ascii_case("operational") {
            row.status.green()
        } else {
            row.status.yellow()
        };
        println!("  {:<6} {:<30} {}", row.id, row.name, status);
    }

    println!();
    println!("  Total: {}", rows.len().to_string().bright_white());
    Ok(())
}

/// Dispatches cache commands.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    match action {
        CacheAction::Inspect { key } => {
            let Some(redis_url) = config.redis_url.as_deref() else {
                println!("{}", "⚠️  Redis is not configured".yellow());
                return Ok(());
            };

            let cache =
                RedisCache::new(redis_url, config.cache_timeout(), &config.cache_key_prefix)?;

            match cache.inspect(&key).await? {
                Some((bytes, ttl)) => {
                    println!("{} {}", "🗝  Key:".bright_blue(), key.cyan());
                    println!("  TTL remaining: {}s", ttl.to_string().bright_white());
                    match serde_json::from_slice::<serde_json::Value>(&bytes) {
                        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
                        Err(_) => {
                            println!(
                                "{}",
                                "⚠️  Entry is not valid JSON (replaced on next miss)".yellow()
                            );
                            println!("{}", String::from_utf8_lossy(&bytes));
                        }
                    }
                }
                None => println!("{} {}", "∅ Not cached:".yellow(), key),
            }
        }
    }

    Ok(())
}

/// Runs one `get_status` through the configured cache and prints its provenance.
async fn run_status(config: &Config) -> Result<()> {
    let pool = schema::connect_pool(config)
        .await
        .context("Failed to connect to database")?;
    let cache = build_cache(config).await;
    let service = build_status_service(config, pool, cache);

    let snapshot = service.get_status().await;

    let source = if snapshot.is_cache_hit() {
        snapshot.source.as_str().green()
    } else {
        snapshot.source.as_str().yellow()
    };
    println!("  Source: {}", source);
    if config.is_cache_enabled() {
        println!("  Cache TTL: {}s", service.ttl_seconds());
    }
    println!("{}", serde_json::to_string_pretty(&snapshot.value)?);

    if snapshot.value.is_error() {
        anyhow::bail!("Status read failed");
    }
    Ok(())
}
