//! Database migration commands.

use clap::{Args, Subcommand};

use crate::output;
use expensehub_core::error::AppError;
use expensehub_database::migration::run_migrations;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::open_database(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    pool.close().await;
    Ok(())
}
