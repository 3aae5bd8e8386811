//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A sign-in session.
///
/// Created on sign-in and terminated on sign-out; expired rows are swept
/// periodically.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier (the `sid` token claim).
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// When the session was ended by sign-out.
    pub terminated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the session can still authenticate requests at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.terminated_at.is_none() && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_activity() {
        let now = Utc::now();
        let mut session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + Duration::hours(1),
            terminated_at: None,
        };
        assert!(session.is_active_at(now));
        assert!(!session.is_active_at(now + Duration::hours(2)));

        session.terminated_at = Some(now);
        assert!(!session.is_active_at(now));
    }
}
