//! Expense repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use expensehub_core::error::{AppError, ErrorKind};
use expensehub_core::result::AppResult;
use expensehub_entity::expense::{CreateExpense, Expense, ExpenseChanges};

use crate::store::ExpenseStore;

/// Constraint violated when the parent group disappears mid-insert.
const GROUP_FK: &str = "expenses_group_id_fkey";

/// Repository for expense CRUD scoped by group owner or creator.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    /// Create a new expense repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn list_by_group(&self, group_id: Uuid, owner_id: Uuid) -> AppResult<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(
            "SELECT e.* FROM expenses e \
             INNER JOIN groups g ON g.id = e.group_id \
             WHERE e.group_id = $1 AND g.created_by = $2 \
             ORDER BY e.created_at DESC",
        )
        .bind(group_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list expenses", e))
    }

    async fn create(&self, data: &CreateExpense) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (id, description, amount, group_id, created_by) \
             SELECT $1, $2, $3, $4, $5 \
             WHERE EXISTS (SELECT 1 FROM groups WHERE id = $4 AND created_by = $5) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.description)
        .bind(data.amount)
        .bind(data.group_id)
        .bind(data.created_by)
        .fetch_optional(&self.pool)
        .await
        .or_else(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(GROUP_FK) => Ok(None),
            _ => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to create expense",
                e,
            )),
        })
    }

    async fn update(
        &self,
        id: Uuid,
        created_by: Uuid,
        changes: &ExpenseChanges,
    ) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>(
            "UPDATE expenses SET description = $3, amount = $4 \
             WHERE id = $1 AND created_by = $2 RETURNING *",
        )
        .bind(id)
        .bind(created_by)
        .bind(&changes.description)
        .bind(changes.amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update expense", e))
    }

    async fn delete(&self, id: Uuid, created_by: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(created_by)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expense", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
