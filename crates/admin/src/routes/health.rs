//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness probe.
///
/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness probe: the admin API answers.
///
/// GET /health/ready
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.api().list_categories().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
