//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from the session token and passed into every
/// service method, so each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The current session ID.
    pub session_id: Uuid,
    /// The user's e-mail address.
    pub email: String,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(
        user_id: Uuid,
        session_id: Uuid,
        email: String,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            email,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// A context for `user_id` with placeholder session details, for
    /// background work and tests.
    pub fn for_user(user_id: Uuid) -> Self {
        Self::new(
            user_id,
            Uuid::nil(),
            String::new(),
            "internal".to_string(),
            None,
        )
    }
}
