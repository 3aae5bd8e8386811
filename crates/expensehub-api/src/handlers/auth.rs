//! Auth handlers: sign-up, confirmation, sign-in, sign-out, me.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use expensehub_auth::guard::SIGN_IN_PATH;
use expensehub_core::error::AppError;
use expensehub_entity::user::Profile;

use crate::dto::request::{ConfirmQuery, SignInRequest, SignUpRequest, validate_request};
use crate::dto::response::{MessageResponse, SuccessResponse};
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_request(&req)?;

    let outcome = state
        .session_manager
        .sign_up(&req.email, &req.password, req.username.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: outcome.message.to_string(),
    }))
}

/// GET /api/auth/confirm?token=
pub async fn confirm(
    State(state): State<AppState>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Redirect, AppError> {
    state
        .session_manager
        .confirm_email(query.token.as_deref().unwrap_or_default())
        .await?;
    Ok(Redirect::to(SIGN_IN_PATH))
}

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<SignInRequest>,
) -> Result<(CookieJar, Json<Profile>), AppError> {
    validate_request(&req)?;

    let result = state
        .session_manager
        .sign_in(&req.email, &req.password)
        .await?;

    let session = &state.config.session;
    let cookie = Cookie::build((session.cookie_name.clone(), result.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(session.cookie_secure);

    Ok((jar.add(cookie), Json(result.user.profile())))
}

/// POST /api/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    state.session_manager.sign_out(auth.session_id).await?;

    let removal = Cookie::build((state.config.session.cookie_name.clone(), "")).path("/");
    Ok((jar.remove(removal), Json(SuccessResponse::ok())))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let profile = state.session_manager.profile(auth.user_id).await?;
    Ok(Json(profile))
}
