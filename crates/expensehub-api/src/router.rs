//! Route definitions for the ExpenseHub HTTP server.
//!
//! JSON endpoints are mounted under `/api`; pages live at the root. The
//! session guard wraps everything and lets `/api` requests through
//! untouched.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(group_routes())
        .merge(expense_routes())
        .fallback(handlers::api_not_found);

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes())
        .fallback(handlers::pages::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_guard::session_guard,
        ))
        .layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Sign-up, confirmation, sign-in/out, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/confirm", get(handlers::auth::confirm))
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/sign-out", post(handlers::auth::sign_out))
        .route("/auth/me", get(handlers::auth::me))
}

/// Group CRUD
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::group::list_groups).post(handlers::group::create_group),
        )
        .route(
            "/groups/{id}",
            put(handlers::group::update_group).delete(handlers::group::delete_group),
        )
}

/// Expenses by group, and individual expenses
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expenses/{group_id}",
            get(handlers::expense::list_expenses).post(handlers::expense::create_expense),
        )
        .route(
            "/expense/{id}",
            put(handlers::expense::update_expense).delete(handlers::expense::delete_expense),
        )
}

/// Server-rendered screens
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::sign_in_page))
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/groups/{id}", get(handlers::pages::group_page))
        .route("/docs", get(handlers::pages::docs))
}
