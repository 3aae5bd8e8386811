//! Group repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use expensehub_core::error::{AppError, ErrorKind};
use expensehub_core::result::AppResult;
use expensehub_entity::group::{CreateGroup, Group};

use crate::store::GroupStore;

/// Repository for owner-scoped group CRUD.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupStore for GroupRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT * FROM groups WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    async fn create(&self, data: &CreateGroup) -> AppResult<Group> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (id, name, created_by) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create group", e))
    }

    async fn rename(&self, id: Uuid, owner_id: Uuid, name: &str) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>(
            "UPDATE groups SET name = $3 WHERE id = $1 AND created_by = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename group", e))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        // expenses go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM groups WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;
        Ok(result.rows_affected() > 0)
    }
}
