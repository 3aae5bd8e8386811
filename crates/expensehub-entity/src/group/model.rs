//! Group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named collection of expenses owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The owning user.
    pub created_by: Uuid,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Whether `user_id` owns this group.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}

/// Data required to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    /// Display name (already validated and trimmed).
    pub name: String,
    /// The owning user.
    pub created_by: Uuid,
}
