//! API key database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for api_keys table
///
/// Only the SHA-256 digest of the key is stored; the raw secret is shown
/// to the caller once at issuance and never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKeyModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub key_hash: String,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}
