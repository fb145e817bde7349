//! CLI administration tool for ephemeral-links.
//!
//! Provides maintenance commands against the link database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Delete expired links now instead of waiting for the sweeper
//! cargo run --bin admin -- sweep
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Newest active links
//! cargo run --bin admin -- recent --limit 20
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL` (optional): prefix used when printing short URLs

use ephemeral_links::config::{Config, StorageBackend};
use ephemeral_links::domain::expiry_sweeper::{DEFAULT_SWEEP_INTERVAL, ExpirySweeper};
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::infrastructure::persistence::PgLinkRepository;
use ephemeral_links::utils::host_url::short_url;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing ephemeral-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Delete expired links now
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// List the newest active links
    Recent {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin commands need STORAGE_BACKEND=postgres");
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Sweep { yes } => handle_sweep(&pool, yes).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Recent { limit } => handle_recent(&pool, &config, limit).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_repository(pool: &PgPool) -> Arc<PgLinkRepository> {
    Arc::new(PgLinkRepository::new(Arc::new(pool.clone())))
}

/// Runs one expiry sweep, the same one the server runs on its timer.
async fn handle_sweep(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Sweep Expired Links".bright_blue().bold());
    println!();

    let expired: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE expires_at < NOW()")
        .fetch_one(pool)
        .await?;

    if expired == 0 {
        println!("{}", "  Nothing to sweep".yellow());
        return Ok(());
    }

    println!(
        "  Expired links: {}",
        expired.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete them?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let sweeper = ExpirySweeper::new(link_repository(pool), DEFAULT_SWEEP_INTERVAL);
    let removed = sweeper
        .sweep_once()
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!(
        "{} {}",
        "✅ Removed".green().bold(),
        format!("{removed} expired links").bright_white()
    );

    Ok(())
}

/// Displays link and visit counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE expires_at > NOW()")
        .fetch_one(pool)
        .await?;

    let custom: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE is_custom")
        .fetch_one(pool)
        .await?;

    let visits: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(visits), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    println!("  Links:          {}", total.to_string().bright_green().bold());
    println!("  Active:         {}", active.to_string().bright_green().bold());
    println!(
        "  Awaiting sweep: {}",
        (total - active).to_string().bright_yellow().bold()
    );
    println!("  Custom codes:   {}", custom.to_string().bright_green().bold());
    println!("  Total visits:   {}", visits.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Lists the newest unexpired links.
async fn handle_recent(pool: &PgPool, config: &Config, limit: i64) -> Result<()> {
    println!("{}", "📋 Recent Links".bright_blue().bold());
    println!();

    let links = link_repository(pool)
        .list_recent(limit, Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No active links".yellow());
        return Ok(());
    }

    let base = config.base_url.as_deref().unwrap_or("/");

    println!(
        "  {:<22} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<22} {:<8} {:<18} {}",
            short_url(base, &link.short_code).cyan(),
            link.visits.to_string().bright_green(),
            link.expires_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let table_size: String =
                sqlx::query_scalar("SELECT pg_size_pretty(pg_total_relation_size('links'))")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  links size: {}", table_size.bright_white());
            println!();
        }
    }

    Ok(())
}
