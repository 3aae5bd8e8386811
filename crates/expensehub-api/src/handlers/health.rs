//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        service: state.config.server.service_name.clone(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Response {
    let (status_code, status, database) = match state.stores.health_check().await {
        Ok(()) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            tracing::error!(error = ?e, "Database health check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy", "unavailable")
        }
    };

    let body = DetailedHealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        service: state.config.server.service_name.clone(),
        backend: state.stores.backend_name().to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(body)).into_response()
}
