//! Expense entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single dated monetary record belonging to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    /// Unique expense identifier.
    pub id: Uuid,
    /// What the money was spent on.
    pub description: String,
    /// Positive amount in the group's currency.
    pub amount: f64,
    /// The group this expense belongs to.
    pub group_id: Uuid,
    /// The user who recorded the expense.
    pub created_by: Uuid,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpense {
    /// Description (already validated and trimmed).
    pub description: String,
    /// Amount (already validated as positive and finite).
    pub amount: f64,
    /// Target group.
    pub group_id: Uuid,
    /// The recording user.
    pub created_by: Uuid,
}

/// Mutable expense fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseChanges {
    /// New description.
    pub description: String,
    /// New amount.
    pub amount: f64,
}

/// Sum of the amounts of `expenses`.
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}
