//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{success: true}` for deletions and sign-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
}

impl SuccessResponse {
    /// A successful response.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// A single user-facing notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The notice.
    pub message: String,
}

/// Basic health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
    /// Service name.
    pub service: String,
}

/// Health check including the data backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
    /// Service name.
    pub service: String,
    /// Active backend ("postgres" or "memory").
    pub backend: String,
    /// "connected" or "unavailable".
    pub database: String,
    /// Crate version.
    pub version: String,
}
