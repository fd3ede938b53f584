//! Refresh token database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for refresh_tokens table
///
/// The `ip` and `user_agent` columns together form the client fingerprint
/// the token was bound to at issuance. Both default to the empty string so
/// clients that omit a header still bind to a definite value.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
}
