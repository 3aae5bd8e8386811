//! Page session guard middleware.
//!
//! Resolves the session cookie and applies [`SessionGuard::evaluate`]. The
//! resolved identity is stored in the request extensions for `AuthUser`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use expensehub_auth::{GuardOutcome, SessionGuard, SessionState};

use crate::extractors::auth::session_token;
use crate::state::AppState;

/// Redirects page navigations according to the caller's session state.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if SessionGuard::is_excluded(&path) {
        return next.run(request).await;
    }

    let identity = match session_token(request.headers(), &state.config.session.cookie_name) {
        Some(token) => match state.session_manager.resolve(&token).await {
            Ok(identity) => identity,
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    let session_state = if identity.is_some() {
        SessionState::Authenticated
    } else {
        SessionState::Anonymous
    };

    match SessionGuard::evaluate(session_state, &path) {
        GuardOutcome::Redirect(to) => {
            debug!(path = %path, to, ?session_state, "Session guard redirect");
            Redirect::to(to).into_response()
        }
        GuardOutcome::Continue => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
    }
}
