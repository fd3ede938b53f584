//! Store traits (ports) - define the interface to the credential store
//!
//! The domain layer defines what it needs from persistence, and the
//! infrastructure layer provides the implementation. Every credential
//! check re-reads from the store; nothing here is cached.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{ApiKey, Device, RefreshToken, User};
use crate::error::DomainError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// User Store
// ============================================================================

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;

    /// Create a new user
    async fn insert(&self, user: &User, password_hash: &str) -> StoreResult<()>;

    /// Get password hash for authentication
    async fn password_hash(&self, id: Uuid) -> StoreResult<Option<String>>;
}

// ============================================================================
// Refresh Token Store
// ============================================================================

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a freshly issued token record
    async fn insert(&self, token: &RefreshToken) -> StoreResult<()>;

    /// Find a record by secret digest, excluding expired rows
    async fn find_live_by_hash(&self, token_hash: &str) -> StoreResult<Option<RefreshToken>>;

    /// Rotate the record in place, guarded by the hash the caller read.
    ///
    /// Returns `false` when the guard no longer matches, i.e. a concurrent
    /// redemption of the same secret already rotated the row. The loser
    /// must treat its secret as spent.
    async fn rotate(
        &self,
        id: Uuid,
        prior_hash: &str,
        new_hash: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<bool>;

    /// Delete the record matching a secret digest, returning rows removed
    async fn delete_by_hash(&self, token_hash: &str) -> StoreResult<u64>;
}

// ============================================================================
// API Key Store
// ============================================================================

#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Persist a freshly issued key record
    async fn insert(&self, key: &ApiKey) -> StoreResult<()>;

    /// Find a key record by secret digest
    async fn find_by_hash(&self, key_hash: &str) -> StoreResult<Option<ApiKey>>;

    /// List a user's keys, newest first
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<ApiKey>>;

    /// Relabel a key, scoped to the owner; returns rows affected
    async fn update_label(
        &self,
        id: Uuid,
        user_id: Uuid,
        label: Option<&str>,
    ) -> StoreResult<u64>;

    /// Delete a key, scoped to the owner; returns rows affected
    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<u64>;

    /// Record when a key was last presented, advisory only
    async fn touch_last_used(&self, id: Uuid) -> StoreResult<()>;
}

// ============================================================================
// Device Store
// ============================================================================

/// Battery readings reported by a device
#[derive(Debug, Clone, Default)]
pub struct DeviceTelemetry {
    pub battery_level: Option<i32>,
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub os_version: Option<String>,
}

/// Partial update of a device's descriptive fields
#[derive(Debug, Clone, Default)]
pub struct DeviceMetadataPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
}

impl DeviceMetadataPatch {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand.is_none()
            && self.model.is_none()
            && self.model_number.is_none()
    }
}

#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Find a device by public uuid and owner
    async fn find_by_uuid_and_user(&self, uuid: &str, user_id: Uuid) -> StoreResult<Option<Device>>;

    /// List a user's devices, most recently updated first
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Device>>;

    /// Register a new device
    async fn insert(&self, device: &Device) -> StoreResult<()>;

    /// Overwrite the battery readings, scoped to the owner; returns rows affected
    async fn update_telemetry(
        &self,
        uuid: &str,
        user_id: Uuid,
        telemetry: &DeviceTelemetry,
    ) -> StoreResult<u64>;

    /// Patch descriptive fields, scoped to the owner; returns rows affected
    async fn update_metadata(
        &self,
        uuid: &str,
        user_id: Uuid,
        patch: &DeviceMetadataPatch,
    ) -> StoreResult<u64>;

    /// Delete a device, scoped to the owner; returns rows affected
    async fn delete(&self, uuid: &str, user_id: Uuid) -> StoreResult<u64>;
}
