//! User account and profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account, including credentials.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Lower-cased e-mail address, unique.
    pub email: String,
    /// Optional display username.
    pub username: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the e-mail address was confirmed (None until then).
    pub email_confirmed_at: Option<DateTime<Utc>>,
    /// Outstanding confirmation token.
    #[serde(skip_serializing)]
    pub confirmation_token: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the account has confirmed its e-mail address.
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    /// The descriptive, credential-free view of this account.
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

/// Descriptive information about an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Matches the authenticated identity.
    pub id: Uuid,
    /// E-mail address.
    pub email: String,
    /// Optional username.
    pub username: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Lower-cased e-mail address.
    pub email: String,
    /// Optional username.
    pub username: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Token that confirms the e-mail; `None` creates a confirmed account.
    pub confirmation_token: Option<String>,
}
