//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Session lifetime and cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure` (requires HTTPS).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Interval between expired session sweeps in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    168
}

fn default_cookie_name() -> String {
    "expensehub_session".to_string()
}

fn default_cleanup_interval() -> u64 {
    15
}
