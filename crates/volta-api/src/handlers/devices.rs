//! Device handlers
//!
//! Device registration and listing require a session. Telemetry
//! updates and deletion accept either a session or an API key, which
//! is how headless devices report without ever logging in.

use axum::{
    extract::{Path, State},
    http::header,
    Json,
};
use volta_service::{
    dto::{
        BatteryResponse, DeviceRegisteredResponse, DeviceResponse, RegisterDeviceRequest,
        SuccessResponse, UpdateDeviceRequest, UpdateTelemetryRequest,
    },
    DeviceService,
};

use crate::{
    extractors::{DeviceIdentity, Session, ValidatedJson},
    response::{ApiResult, Created},
    state::AppState,
};

/// List the caller's devices
///
/// GET /api/devices
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<([(header::HeaderName, &'static str); 1], Json<Vec<DeviceResponse>>)> {
    let service = DeviceService::new(state.service_context());
    let devices = service.list(session.user_id).await?;

    // The dashboard polls this list; stale battery levels are worse
    // than the extra request
    let no_store = [(
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, max-age=0",
    )];

    Ok((no_store, Json(devices)))
}

/// Register a device under the caller's account
///
/// POST /api/devices
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<RegisterDeviceRequest>,
) -> ApiResult<Created<Json<DeviceRegisteredResponse>>> {
    let service = DeviceService::new(state.service_context());
    let registered = service.register(session.user_id, request).await?;

    Ok(Created(Json(registered)))
}

/// Report fresh telemetry readings for a device
///
/// PUT /api/devices/:uuid
pub async fn update_telemetry(
    State(state): State<AppState>,
    identity: DeviceIdentity,
    Path(uuid): Path<String>,
    Json(request): Json<UpdateTelemetryRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = DeviceService::new(state.service_context());
    service
        .update_telemetry(identity.user_id, &uuid, request)
        .await?;

    Ok(Json(SuccessResponse::new()))
}

/// Update a device's descriptive fields
///
/// PATCH /api/devices/:uuid
pub async fn update_metadata(
    State(state): State<AppState>,
    session: Session,
    Path(uuid): Path<String>,
    Json(request): Json<UpdateDeviceRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = DeviceService::new(state.service_context());
    service
        .update_metadata(session.user_id, &uuid, request)
        .await?;

    Ok(Json(SuccessResponse::new()))
}

/// Remove a device
///
/// DELETE /api/devices/:uuid
pub async fn delete(
    State(state): State<AppState>,
    identity: DeviceIdentity,
    Path(uuid): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = DeviceService::new(state.service_context());
    service.delete(identity.user_id, &uuid).await?;

    Ok(Json(SuccessResponse::new()))
}

/// Get the latest battery readings for a device
///
/// GET /api/battery/:uuid
pub async fn battery(
    State(state): State<AppState>,
    session: Session,
    Path(uuid): Path<String>,
) -> ApiResult<Json<BatteryResponse>> {
    let service = DeviceService::new(state.service_context());
    let readings = service.battery(session.user_id, &uuid).await?;

    Ok(Json(readings))
}
