//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "EXPENSEHUB";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml`, the overlay
    /// `config/{env}.toml`, and environment variables prefixed with
    /// `EXPENSEHUB__` (e.g. `EXPENSEHUB__DATABASE__URL`).
    ///
    /// Missing files are skipped; every field has a default.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", Some(&format!("config/{env}")))
    }

    /// Load configuration from an explicit base file and optional overlay.
    pub fn load_from(base: &str, overlay: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(base).required(false));

        if let Some(overlay) = overlay {
            builder = builder.add_source(config::File::with_name(overlay).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// True when a persistent backend would sign sessions with the shipped
    /// placeholder secret.
    pub fn insecure_jwt_secret(&self) -> bool {
        self.database.backend == DatabaseBackend::Postgres && self.auth.has_placeholder_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable_without_files() {
        let config = AppConfig::load_from("does/not/exist", None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.service_name, "group-expense-tracker");
        assert_eq!(config.database.backend, DatabaseBackend::Postgres);
        assert_eq!(config.session.cookie_name, "expensehub_session");
        assert!(config.auth.require_email_confirmation);
    }

    #[test]
    fn test_default_impl_matches_serde_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.auth.password_min_length, 6);
        assert_eq!(config.session.ttl_hours, 168);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_placeholder_secret_flagged_only_for_postgres() {
        let mut config = AppConfig::default();
        assert!(config.auth.has_placeholder_secret());
        assert!(config.insecure_jwt_secret());

        config.database.backend = DatabaseBackend::Memory;
        assert!(!config.insecure_jwt_secret());

        config.database.backend = DatabaseBackend::Postgres;
        config.auth.jwt_secret = "a-real-secret".to_string();
        assert!(!config.auth.has_placeholder_secret());
        assert!(!config.insecure_jwt_secret());
    }
}
