//! Expense handlers.

use axum::Json;
use axum::extract::State;

use expensehub_core::error::AppError;
use expensehub_entity::expense::Expense;

use crate::dto::request::ExpenseRequest;
use crate::dto::response::SuccessResponse;
use crate::extractors::{ApiJson, AuthUser, PathId};
use crate::state::AppState;

/// GET /api/expenses/{group_id}
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(group_id): PathId,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = state.expense_service.list(&auth, group_id).await?;
    Ok(Json(expenses))
}

/// POST /api/expenses/{group_id}
pub async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(group_id): PathId,
    ApiJson(req): ApiJson<ExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .expense_service
        .create(
            &auth,
            group_id,
            req.description.as_deref(),
            req.amount.as_ref(),
        )
        .await?;
    Ok(Json(expense))
}

/// PUT /api/expense/{id}
pub async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ApiJson(req): ApiJson<ExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    let expense = state
        .expense_service
        .update(&auth, id, req.description.as_deref(), req.amount.as_ref())
        .await?;
    Ok(Json(expense))
}

/// DELETE /api/expense/{id}
pub async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> Result<Json<SuccessResponse>, AppError> {
    state.expense_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
