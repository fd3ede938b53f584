//! Refresh token entity <-> model mapper

use volta_core::entities::RefreshToken;
use volta_core::value_objects::ClientFingerprint;

use crate::models::RefreshTokenModel;

/// Convert RefreshTokenModel to RefreshToken entity
impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            issued_at: model.issued_at,
            expires_at: model.expires_at,
            fingerprint: ClientFingerprint::new(model.ip, model.user_agent),
        }
    }
}
