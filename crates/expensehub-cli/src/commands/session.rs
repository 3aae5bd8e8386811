//! Session maintenance commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::output;
use expensehub_auth::SessionCleanup;
use expensehub_core::error::AppError;
use expensehub_database::repositories::SessionRepository;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Delete expired and signed-out sessions once
    Cleanup,
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::open_database(&config).await?;

    match &args.command {
        SessionCommand::Cleanup => {
            let sessions = Arc::new(SessionRepository::new(pool.pool().clone()));
            let cleanup = SessionCleanup::new(sessions, config.session.cleanup_interval_minutes);
            let removed = cleanup.run_cleanup().await?;
            output::print_success(&format!("Removed {removed} inactive sessions"));
        }
    }

    pool.close().await;
    Ok(())
}
