//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{api_keys, auth, devices, health};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(api_key_routes())
        .merge(device_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// API key routes
fn api_key_routes() -> Router<AppState> {
    Router::new()
        .route("/api-keys", get(api_keys::list))
        .route("/api-keys", post(api_keys::create))
        .route("/api-keys/:id", patch(api_keys::relabel))
        .route("/api-keys/:id", delete(api_keys::revoke))
}

/// Device routes
fn device_routes() -> Router<AppState> {
    Router::new()
        // Device CRUD
        .route("/devices", get(devices::list))
        .route("/devices", post(devices::register))
        .route("/devices/:uuid", put(devices::update_telemetry))
        .route("/devices/:uuid", patch(devices::update_metadata))
        .route("/devices/:uuid", delete(devices::delete))
        // Battery readings
        .route("/battery/:uuid", get(devices::battery))
}
