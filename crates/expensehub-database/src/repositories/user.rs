//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use expensehub_core::error::{AppError, ErrorKind};
use expensehub_core::result::AppResult;
use expensehub_entity::user::{CreateUser, User};

use crate::store::UserStore;

/// Repository for account lookups, registration, and confirmation.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, username, password_hash, confirmation_token, email_confirmed_at) \
             VALUES ($1, $2, $3, $4, $5, CASE WHEN $5::TEXT IS NULL THEN NOW() END) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.confirmation_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("User already registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn confirm_by_token(&self, token: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET email_confirmed_at = NOW(), confirmation_token = NULL \
             WHERE confirmation_token = $1 RETURNING *",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm user", e))
    }

    async fn confirm_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET email_confirmed_at = COALESCE(email_confirmed_at, NOW()), \
             confirmation_token = NULL WHERE email = $1 RETURNING *",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm user", e))
    }
}
