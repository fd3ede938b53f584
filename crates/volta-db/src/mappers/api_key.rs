//! API key entity <-> model mapper

use volta_core::entities::ApiKey;

use crate::models::ApiKeyModel;

/// Convert ApiKeyModel to ApiKey entity
impl From<ApiKeyModel> for ApiKey {
    fn from(model: ApiKeyModel) -> Self {
        ApiKey {
            id: model.id,
            user_id: model.user_id,
            key_hash: model.key_hash,
            label: model.label,
            created_at: model.created_at,
            last_used_at: model.last_used_at,
        }
    }
}
