//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod session;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use expensehub_core::config::{AppConfig, DatabaseBackend};
use expensehub_core::error::AppError;
use expensehub_database::DatabasePool;

/// ExpenseHub administration
#[derive(Debug, Parser)]
#[command(name = "expensehub", version, about, long_about = None)]
pub struct Cli {
    /// Environment overlay to load on top of `config/default.toml`
    #[arg(short, long, env = "EXPENSEHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Account management
    User(user::UserArgs),
    /// Session maintenance
    Session(session::SessionArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
            Commands::Session(args) => session::execute(args, &self.env).await,
            Commands::Config(args) => config::execute(args, &self.env, self.format),
        }
    }
}

/// Load the layered configuration for `env`.
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Open a PostgreSQL pool. Administrative commands have nothing to act on
/// with the memory backend, so it is rejected.
pub async fn open_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "The memory backend keeps no data between processes; configure database.backend = \"postgres\"",
        ));
    }
    DatabasePool::connect(&config.database).await
}
