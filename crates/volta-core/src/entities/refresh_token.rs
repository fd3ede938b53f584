//! Refresh token entity - server-side record of a rotating opaque secret

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::value_objects::ClientFingerprint;

/// Server-side record of one refresh token.
///
/// Only the SHA-256 digest of the opaque secret is ever stored; the raw
/// value lives in the client's cookie and nowhere else. The row is rotated
/// in place on every successful refresh, which is what makes a previously
/// presented secret single-use: its digest no longer matches any row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub fingerprint: ClientFingerprint,
}

impl RefreshToken {
    /// Create a new record for a freshly issued secret digest
    pub fn issue(
        user_id: Uuid,
        token_hash: String,
        lifetime_secs: i64,
        fingerprint: ClientFingerprint,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            issued_at: now,
            expires_at: now + Duration::seconds(lifetime_secs),
            fingerprint,
        }
    }

    /// Check if the token is past its expiry
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Compare the stored fingerprint against the requesting client's
    #[inline]
    pub fn matches_fingerprint(&self, other: &ClientFingerprint) -> bool {
        self.fingerprint == *other
    }
}
