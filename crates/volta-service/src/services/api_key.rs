//! API key service
//!
//! Issues, lists, relabels, and revokes per-user API keys, and resolves
//! a presented key to its owner for device reporting.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use volta_common::auth::{generate_opaque_token, sha256_hex};
use volta_common::AppError;
use volta_core::entities::ApiKey;

use crate::dto::{ApiKeyCreatedResponse, ApiKeyResponse, CreateApiKeyRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// API key service
pub struct ApiKeyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApiKeyService<'a> {
    /// Create a new ApiKeyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mint a new key for the user.
    ///
    /// The response carries the only copy of the raw secret; the store
    /// keeps its digest.
    #[instrument(skip(self, request))]
    pub async fn issue(
        &self,
        user_id: Uuid,
        request: CreateApiKeyRequest,
    ) -> ServiceResult<ApiKeyCreatedResponse> {
        let raw_key = generate_opaque_token();
        let key = ApiKey::new(user_id, sha256_hex(&raw_key), request.label);

        self.ctx.api_key_store().insert(&key).await?;

        info!(key_id = %key.id, "API key issued");

        Ok(ApiKeyCreatedResponse {
            api_key: raw_key,
            id: key.id,
        })
    }

    /// List the user's keys, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> ServiceResult<Vec<ApiKeyResponse>> {
        let keys = self.ctx.api_key_store().list_for_user(user_id).await?;

        Ok(keys.iter().map(ApiKeyResponse::from).collect())
    }

    /// Change or clear a key's label.
    ///
    /// Succeeds whether or not the key exists under this user, so the
    /// response never discloses another user's key IDs.
    #[instrument(skip(self))]
    pub async fn relabel(
        &self,
        user_id: Uuid,
        key_id: Uuid,
        label: Option<String>,
    ) -> ServiceResult<()> {
        let rows = self
            .ctx
            .api_key_store()
            .update_label(key_id, user_id, label.as_deref())
            .await?;

        debug!(rows, "API key relabel applied");
        Ok(())
    }

    /// Revoke a key. Succeeds whether or not the key existed.
    #[instrument(skip(self))]
    pub async fn revoke(&self, user_id: Uuid, key_id: Uuid) -> ServiceResult<()> {
        let rows = self.ctx.api_key_store().delete(key_id, user_id).await?;

        debug!(rows, "API key revocation applied");
        Ok(())
    }

    /// Resolve a presented raw key to its stored record.
    ///
    /// Looked up by digest against the store on every call. An unknown
    /// key is rejected as forbidden rather than unauthorized; the caller
    /// presented a credential, it just isn't a live one.
    #[instrument(skip(self, raw_key))]
    pub async fn authenticate(&self, raw_key: &str) -> ServiceResult<ApiKey> {
        let key = self
            .ctx
            .api_key_store()
            .find_by_hash(&sha256_hex(raw_key))
            .await?
            .ok_or(ServiceError::App(AppError::Forbidden))?;

        // Advisory only; a failed stamp must not reject a valid key
        if let Err(e) = self.ctx.api_key_store().touch_last_used(key.id).await {
            warn!(key_id = %key.id, error = %e, "Failed to record key use");
        }

        Ok(key)
    }
}
