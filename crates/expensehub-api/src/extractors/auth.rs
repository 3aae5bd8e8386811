//! `AuthUser` extractor: resolves the session cookie (or a bearer token)
//! and injects an explicit request context.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use expensehub_auth::SessionIdentity;
use expensehub_core::error::AppError;
use expensehub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The session token presented with a request: the session cookie first,
/// then an `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The session guard may already have resolved this request.
        let identity = match parts.extensions.get::<SessionIdentity>() {
            Some(identity) => identity.clone(),
            None => {
                let token = session_token(&parts.headers, &state.config.session.cookie_name)
                    .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;
                state.session_manager.authenticate(&token).await?
            }
        };

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .unwrap_or("unknown")
            .to_string();

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(AuthUser(RequestContext::new(
            identity.user_id,
            identity.session_id,
            identity.email,
            ip_address,
            user_agent,
        )))
    }
}
