//! Page handlers. The session guard runs before all of these.

use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};

use expensehub_auth::SessionIdentity;
use expensehub_auth::guard::HOME_PATH;
use expensehub_core::error::{AppError, ErrorKind};

use crate::extractors::AuthUser;
use crate::extractors::path::parse_uuid;
use crate::state::AppState;
use crate::views;

/// GET /
pub async fn sign_in_page() -> Html<String> {
    views::sign_in::render()
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Html<String>, AppError> {
    let groups = state.group_service.list(&auth).await?;
    Ok(views::dashboard::render(&auth.email, &groups))
}

/// GET /groups/{id}
///
/// Unknown or foreign groups send the caller back to the dashboard.
pub async fn group_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(group_id) = parse_uuid(&raw_id) else {
        return Ok(Redirect::to(HOME_PATH).into_response());
    };

    let group = match state.group_service.get(&auth, group_id).await {
        Ok(group) => group,
        Err(e) if e.kind == ErrorKind::NotFound => {
            return Ok(Redirect::to(HOME_PATH).into_response());
        }
        Err(e) => return Err(e),
    };
    let expenses = state.expense_service.list(&auth, group_id).await?;

    Ok(views::group::render(&group, &expenses).into_response())
}

/// GET /docs
pub async fn docs(request: Request) -> Html<String> {
    views::docs::render(request.extensions().get::<SessionIdentity>().is_some())
}

/// Fallback for everything that is neither a page nor an API route.
pub async fn not_found(uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return AppError::not_found("Not found").into_response();
    }
    (StatusCode::NOT_FOUND, views::not_found_page()).into_response()
}
