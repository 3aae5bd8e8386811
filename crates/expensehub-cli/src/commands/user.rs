//! Account management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use expensehub_core::error::AppError;
use expensehub_database::UserStore;
use expensehub_database::repositories::UserRepository;
use expensehub_entity::User;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Show an account by e-mail
    Show {
        /// E-mail address
        email: String,
    },
    /// Mark an account's e-mail as confirmed without the link
    Confirm {
        /// E-mail address
        email: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Username
    username: String,
    /// Confirmed
    confirmed: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone().unwrap_or_default(),
            confirmed: user
                .email_confirmed_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "no".to_string()),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::open_database(&config).await?;
    let users = UserRepository::new(pool.pool().clone());

    let result = match &args.command {
        UserCommand::Show { email } => show(&users, email, format).await,
        UserCommand::Confirm { email, force } => confirm(&users, email, *force).await,
    };

    pool.close().await;
    result
}

async fn show(users: &UserRepository, email: &str, format: OutputFormat) -> Result<(), AppError> {
    let user = users
        .find_by_email(&email.to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

    output::print_list(&[UserRow::from(&user)], format);
    Ok(())
}

async fn confirm(users: &UserRepository, email: &str, force: bool) -> Result<(), AppError> {
    let email = email.to_lowercase();
    let user = users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

    if user.is_confirmed() {
        output::print_warning(&format!("User '{email}' is already confirmed"));
        return Ok(());
    }

    if !force {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Confirm '{email}' without the e-mail link?"))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    users
        .confirm_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

    output::print_success(&format!("User '{email}' confirmed"));
    Ok(())
}
