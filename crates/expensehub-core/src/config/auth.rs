//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Shipped signing secret; must be overridden outside local development.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// New accounts must confirm their e-mail before signing in.
    #[serde(default = "default_true")]
    pub require_email_confirmation: bool,
    /// Externally reachable base URL used to build confirmation links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            password_min_length: default_password_min(),
            require_email_confirmation: default_true(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret was never changed from the shipped value.
    pub fn has_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_password_min() -> usize {
    6
}

fn default_true() -> bool {
    true
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}
