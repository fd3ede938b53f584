//! API key entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A long-lived programmatic credential owned by one user.
///
/// As with refresh tokens, only the SHA-256 digest of the key is stored;
/// the raw key is shown exactly once at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub id: Uuid,
    pub user_id: Uuid,
    pub key_hash: String,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// Create a new key record from a freshly generated digest
    pub fn new(user_id: Uuid, key_hash: String, label: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            key_hash,
            label,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }
}
