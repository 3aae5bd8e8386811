//! Convenience result type alias for ExpenseHub.

use crate::error::AppError;

/// A specialized `Result` type for ExpenseHub operations.
pub type AppResult<T> = Result<T, AppError>;
