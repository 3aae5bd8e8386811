//! Group handlers.

use axum::Json;
use axum::extract::State;

use expensehub_core::error::AppError;
use expensehub_entity::group::Group;

use crate::dto::request::GroupRequest;
use crate::dto::response::SuccessResponse;
use crate::extractors::{ApiJson, AuthUser, PathId};
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Group>>, AppError> {
    let groups = state.group_service.list(&auth).await?;
    Ok(Json(groups))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<GroupRequest>,
) -> Result<Json<Group>, AppError> {
    let group = state
        .group_service
        .create(&auth, req.name.as_deref())
        .await?;
    Ok(Json(group))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ApiJson(req): ApiJson<GroupRequest>,
) -> Result<Json<Group>, AppError> {
    let group = state
        .group_service
        .update(&auth, id, req.name.as_deref())
        .await?;
    Ok(Json(group))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> Result<Json<SuccessResponse>, AppError> {
    state.group_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
