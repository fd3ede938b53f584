//! API key management handlers
//!
//! All endpoints here require a session; raw keys are returned only at
//! issuance and never appear in listings.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use volta_service::{
    dto::{
        ApiKeyCreatedResponse, ApiKeyResponse, CreateApiKeyRequest, SuccessResponse,
        UpdateApiKeyRequest,
    },
    ApiKeyService,
};

use crate::{
    extractors::Session,
    response::{ApiResult, Created},
    state::AppState,
};

/// List the caller's API keys
///
/// GET /api/api-keys
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<Vec<ApiKeyResponse>>> {
    let service = ApiKeyService::new(state.service_context());
    let keys = service.list(session.user_id).await?;

    Ok(Json(keys))
}

/// Issue a new API key
///
/// POST /api/api-keys
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    body: Option<Json<CreateApiKeyRequest>>,
) -> ApiResult<Created<Json<ApiKeyCreatedResponse>>> {
    // The body is optional; an absent one issues an unlabeled key
    let Json(request) = body.unwrap_or_default();

    let service = ApiKeyService::new(state.service_context());
    let created = service.issue(session.user_id, request).await?;

    Ok(Created(Json(created)))
}

/// Change or clear an API key's label
///
/// PATCH /api/api-keys/:id
pub async fn relabel(
    State(state): State<AppState>,
    session: Session,
    Path(key_id): Path<Uuid>,
    body: Option<Json<UpdateApiKeyRequest>>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(request) = body.unwrap_or_default();

    let service = ApiKeyService::new(state.service_context());
    service.relabel(session.user_id, key_id, request.label).await?;

    Ok(Json(SuccessResponse::new()))
}

/// Revoke an API key
///
/// DELETE /api/api-keys/:id
pub async fn revoke(
    State(state): State<AppState>,
    session: Session,
    Path(key_id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = ApiKeyService::new(state.service_context());
    service.revoke(session.user_id, key_id).await?;

    Ok(Json(SuccessResponse::new()))
}
