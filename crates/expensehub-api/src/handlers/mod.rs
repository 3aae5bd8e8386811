//! Route handlers organized by domain.

pub mod auth;
pub mod expense;
pub mod group;
pub mod health;
pub mod pages;

use expensehub_core::error::AppError;

/// Fallback for unknown `/api` routes.
pub async fn api_not_found() -> AppError {
    AppError::not_found("Not found")
}
