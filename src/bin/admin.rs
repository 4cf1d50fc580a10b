//! CLI administration tool for the store directory.
//!
//! Provides commands for managing accounts, reading the listing reports,
//! and performing database operations without going through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- account create
//!
//! # Issue a password reset link without sending mail
//! cargo run --bin admin -- account reset-link wes@example.com
//!
//! # Reports
//! cargo run --bin admin -- stores tags
//! cargo run --bin admin -- stores top --limit 5
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - The `account reset-link` and `stores` commands load the full server
//!   configuration (see [`store_directory::config`])

use store_directory::config;
use store_directory::domain::entities::{NewAccount, normalize_email};
use store_directory::domain::repositories::AccountRepository;
use store_directory::infrastructure::cache::NullCache;
use store_directory::infrastructure::mail::LogMailer;
use store_directory::infrastructure::persistence::PgAccountRepository;
use store_directory::state::AppState;
use store_directory::utils::password::{hash_password, validate_password};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::ValidateEmail;

/// CLI tool for managing the store directory.
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
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Listing reports
    Stores {
        #[command(subcommand)]
        action: StoresAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create an account
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Issue a password reset and print the link instead of mailing it
    ResetLink {
        /// Email of the account to reset
        email: String,
    },
}

/// Report subcommands.
#[derive(Subcommand)]
enum StoresAction {
    /// Tag frequencies, most used first
    Tags,

    /// Best average ratings
    Top {
        /// Number of listings to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stores { action } => handle_stores_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds the service layer over `pool`. Mail is logged, never sent.
fn services(pool: &PgPool) -> Result<AppState> {
    let config = config::load_from_env()?;
    Ok(AppState::new(
        Arc::new(pool.clone()),
        Arc::new(NullCache::new()),
        Arc::new(LogMailer::new()),
        &config,
    ))
}

/// Dispatches account management commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    match action {
        AccountAction::Create { name, email, yes } => {
            let repo = PgAccountRepository::new(Arc::new(pool.clone()));
            create_account(&repo, name, email, yes).await?;
        }
        AccountAction::ResetLink { email } => {
            let state = services(pool)?;
            issue_reset_link(&state, &email).await?;
        }
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// The password is always prompted for, never taken from arguments.
async fn create_account(
    repo: &PgAccountRepository,
    name: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = normalize_email(&email);
    if !email.validate_email() {
        anyhow::bail!("'{}' is not a valid email", email);
    }

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    validate_password(&password)?;

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Name:  {}", name.cyan());
    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let account = repo
        .create(NewAccount {
            name: name.trim().to_string(),
            email,
            password_hash: hash_password(&password)?,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Account created with id".green().bold(),
        account.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Issues a reset token and prints the link for out-of-band delivery.
async fn issue_reset_link(state: &AppState, email: &str) -> Result<()> {
    println!("{}", "🔑 Password Reset Link".bright_blue().bold());
    println!();

    let link = state
        .recovery_service
        .issue_reset_link(email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to issue reset: {}", e))?;

    println!("  {}", link.bright_yellow());
    println!();
    println!(
        "{}",
        "⚠️  Anyone with this link can set the account's password.".red()
    );
    println!();

    Ok(())
}

/// Dispatches report commands.
async fn handle_stores_action(action: StoresAction, pool: &PgPool) -> Result<()> {
    let state = services(pool)?;

    match action {
        StoresAction::Tags => {
            println!("{}", "🏷️  Tags".bright_blue().bold());
            println!();

            let tags = state
                .store_service
                .tag_counts()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load tags: {}", e))?;

            if tags.is_empty() {
                println!("{}", "  No tagged stores".yellow());
                return Ok(());
            }

            for tag in &tags {
                println!(
                    "  {:<30} {}",
                    tag.tag.cyan(),
                    tag.count.to_string().bright_green().bold()
                );
            }
        }
        StoresAction::Top { limit } => {
            println!("{}", "⭐ Top Stores".bright_blue().bold());
            println!();

            let top = state
                .store_service
                .top_rated_stores(limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load ranking: {}", e))?;

            if top.is_empty() {
                println!("{}", "  No store has enough reviews yet".yellow());
                return Ok(());
            }

            println!(
                "  {:<3} {:<30} {:<8} {}",
                "#".bright_white().bold(),
                "Name".bright_white().bold(),
                "Reviews".bright_white().bold(),
                "Average".bright_white().bold()
            );
            println!("  {}", "─".repeat(55).bright_black());

            for (i, store) in top.iter().enumerate() {
                println!(
                    "  {:<3} {:<30} {:<8} {:.2}",
                    (i + 1).to_string().bright_black(),
                    store.name.cyan(),
                    store.review_count,
                    store.average_rating
                );
            }
        }
    }

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

            let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
                .fetch_one(pool)
                .await?;
            let stores: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
                .fetch_one(pool)
                .await?;
            let reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Accounts:   {}", accounts.to_string().bright_green().bold());
            println!("  Stores:     {}", stores.to_string().bright_green().bold());
            println!("  Reviews:    {}", reviews.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
