//! Health check handlers
//!
//! Liveness and readiness endpoints for load balancers and orchestration.

use axum::{extract::State, http::StatusCode, Json};
use volta_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Liveness check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check
///
/// GET /health/ready
///
/// Verifies the database connection is available. Returns 503 when
/// the pool cannot hand out a connection.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database_healthy = state
        .service_context()
        .pool()
        .acquire()
        .await
        .map(|_| true)
        .unwrap_or(false);

    let status = if database_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::ready(database_healthy)))
}
