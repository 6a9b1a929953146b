//! CLI administration tool for users-api.
//!
//! Provides commands for inspecting and managing users and the database
//! without going through the HTTP API. User commands run through the same
//! [`UserService`] as the server, so validation and error mapping match.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # List users
//! cargo run --bin admin -- users list --page 2 --limit 20
//!
//! # Show a single user
//! cargo run --bin admin -- users show 42
//!
//! # Delete a user
//! cargo run --bin admin -- users delete 42
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*` components).

use users_api::application::services::{UserResponse, UserService};
use users_api::config;
use users_api::error::AppError;
use users_api::infrastructure::persistence::PgUserRepository;
use users_api::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing users-api.
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
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users ordered by id
    List {
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },

    /// Show a single user
    Show { id: i32 },

    /// Delete a user
    Delete {
        id: i32,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Users { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(repository, tracing::Span::none());

    match action {
        UserAction::List { page, limit } => list_users(&service, page, limit).await?,
        UserAction::Show { id } => show_user(&service, id).await?,
        UserAction::Delete { id, yes } => delete_user(&service, id, yes).await?,
    }

    Ok(())
}

/// Lists a page of users.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   ID    Name                           Date of birth  Age
///   ──────────────────────────────────────────────────────────────
///   1     Alice                          1990-05-15     34
/// ```
async fn list_users(service: &UserService, page: i64, limit: i64) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = service
        .list_users(page, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;
    let total = service
        .count_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users on this page".yellow());
        println!();
        println!("  Total: {}", total.to_string().bright_white().bold());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<14} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Date of birth".bright_white().bold(),
        "Age".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for user in &users {
        print_user_row(user);
    }

    println!();
    println!(
        "  Showing: {}  Total: {}",
        users.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn print_user_row(user: &UserResponse) {
    let age = user.age.map(|a| a.to_string()).unwrap_or_default();

    println!(
        "  {:<5} {:<30} {:<14} {}",
        user.id.to_string().bright_black(),
        user.name.cyan(),
        user.dob,
        age
    );
}

/// Shows one user, including age.
async fn show_user(service: &UserService, id: i32) -> Result<()> {
    match service.get_user_by_id(id).await {
        Ok(user) => {
            println!("{}", "👤 User".bright_blue().bold());
            println!();
            println!("  ID:            {}", user.id.to_string().bright_black());
            println!("  Name:          {}", user.name.cyan());
            println!("  Date of birth: {}", user.dob);
            if let Some(age) = user.age {
                println!("  Age:           {}", age.to_string().bright_white().bold());
            }
            println!();
            Ok(())
        }
        Err(AppError::UserNotFound) => {
            println!("{}", format!("⚠️  User {} not found", id).yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Deletes a user after confirmation.
///
/// # Safety
///
/// - Shows the user before asking
/// - Requires confirmation (default: No) unless `--yes`
async fn delete_user(service: &UserService, id: i32, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = match service.get_user_by_id(id).await {
        Ok(user) => user,
        Err(AppError::UserNotFound) => {
            println!("{}", format!("⚠️  User {} not found", id).yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  User: {}", user.name.cyan());
    println!("  ID:   {}", user.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_user(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    println!("{}", "✅ User deleted successfully!".green().bold());
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
        DbAction::Migrate => {
            println!("{}", "📦 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
