//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use expensehub_core::config::AppConfig;
use expensehub_core::error::AppError;
use expensehub_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Check that the configuration loads and deserializes
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(super::load_config(env)?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => print_summary(&config),
            }
        }
        ConfigCommand::Validate => match super::load_config(env) {
            Ok(config) => {
                output::print_success(&format!("Configuration for '{env}' is valid"));
                print_summary(&redacted(config));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Hide credentials before printing.
fn redacted(mut config: AppConfig) -> AppConfig {
    config.database.url = mask_password(&config.database.url);
    config.auth.jwt_secret = "****".to_string();
    config
}

fn print_summary(config: &AppConfig) {
    output::print_kv(
        "Server",
        &format!("{}:{}", config.server.host, config.server.port),
    );
    output::print_kv("Service name", &config.server.service_name);
    output::print_kv("Database backend", &config.database.backend.to_string());
    output::print_kv("Database URL", &config.database.url);
    output::print_kv(
        "Email confirmation",
        &config.auth.require_email_confirmation.to_string(),
    );
    output::print_kv("Session TTL (hours)", &config.session.ttl_hours.to_string());
    output::print_kv("Session cookie", &config.session.cookie_name);
    output::print_kv(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_hides_secrets() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://app:hunter2@db:5432/expenses".to_string();
        config.auth.jwt_secret = "super-secret".to_string();

        let shown = redacted(config);
        assert_eq!(shown.database.url, "postgres://app:****@db:5432/expenses");
        assert_eq!(shown.auth.jwt_secret, "****");
    }
}
