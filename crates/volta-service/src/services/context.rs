//! Service context - dependency container for services
//!
//! Holds the stores, token codec, and other dependencies needed by services.

use std::sync::Arc;

use volta_common::auth::{JwtCodec, PasswordService};
use volta_core::traits::{ApiKeyStore, DeviceStore, RefreshTokenStore, UserStore};
use volta_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Credential and device stores
/// - JWT codec for session tokens
/// - Password hashing service
/// - Refresh token lifetime configuration
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Stores
    user_store: Arc<dyn UserStore>,
    refresh_token_store: Arc<dyn RefreshTokenStore>,
    api_key_store: Arc<dyn ApiKeyStore>,
    device_store: Arc<dyn DeviceStore>,

    // Services
    jwt: Arc<JwtCodec>,
    passwords: Arc<PasswordService>,

    // Configuration
    refresh_token_ttl: i64,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_store: Arc<dyn UserStore>,
        refresh_token_store: Arc<dyn RefreshTokenStore>,
        api_key_store: Arc<dyn ApiKeyStore>,
        device_store: Arc<dyn DeviceStore>,
        jwt: Arc<JwtCodec>,
        passwords: Arc<PasswordService>,
        refresh_token_ttl: i64,
    ) -> Self {
        Self {
            pool,
            user_store,
            refresh_token_store,
            api_key_store,
            device_store,
            jwt,
            passwords,
            refresh_token_ttl,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Stores ===

    /// Get the user store
    pub fn user_store(&self) -> &dyn UserStore {
        self.user_store.as_ref()
    }

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &dyn RefreshTokenStore {
        self.refresh_token_store.as_ref()
    }

    /// Get the API key store
    pub fn api_key_store(&self) -> &dyn ApiKeyStore {
        self.api_key_store.as_ref()
    }

    /// Get the device store
    pub fn device_store(&self) -> &dyn DeviceStore {
        self.device_store.as_ref()
    }

    // === Services ===

    /// Get the JWT codec
    pub fn jwt(&self) -> &JwtCodec {
        self.jwt.as_ref()
    }

    /// Get the password service
    pub fn passwords(&self) -> &PasswordService {
        self.passwords.as_ref()
    }

    // === Configuration ===

    /// Refresh token lifetime in seconds
    pub fn refresh_token_ttl(&self) -> i64 {
        self.refresh_token_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("stores", &"...")
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_store: Option<Arc<dyn UserStore>>,
    refresh_token_store: Option<Arc<dyn RefreshTokenStore>>,
    api_key_store: Option<Arc<dyn ApiKeyStore>>,
    device_store: Option<Arc<dyn DeviceStore>>,
    jwt: Option<Arc<JwtCodec>>,
    passwords: Option<Arc<PasswordService>>,
    refresh_token_ttl: Option<i64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_store: None,
            refresh_token_store: None,
            api_key_store: None,
            device_store: None,
            jwt: None,
            passwords: None,
            refresh_token_ttl: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    pub fn refresh_token_store(mut self, store: Arc<dyn RefreshTokenStore>) -> Self {
        self.refresh_token_store = Some(store);
        self
    }

    pub fn api_key_store(mut self, store: Arc<dyn ApiKeyStore>) -> Self {
        self.api_key_store = Some(store);
        self
    }

    pub fn device_store(mut self, store: Arc<dyn DeviceStore>) -> Self {
        self.device_store = Some(store);
        self
    }

    pub fn jwt(mut self, jwt: Arc<JwtCodec>) -> Self {
        self.jwt = Some(jwt);
        self
    }

    pub fn passwords(mut self, passwords: Arc<PasswordService>) -> Self {
        self.passwords = Some(passwords);
        self
    }

    pub fn refresh_token_ttl(mut self, seconds: i64) -> Self {
        self.refresh_token_ttl = Some(seconds);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.user_store.ok_or_else(|| super::error::ServiceError::validation("user_store is required"))?,
            self.refresh_token_store.ok_or_else(|| super::error::ServiceError::validation("refresh_token_store is required"))?,
            self.api_key_store.ok_or_else(|| super::error::ServiceError::validation("api_key_store is required"))?,
            self.device_store.ok_or_else(|| super::error::ServiceError::validation("device_store is required"))?,
            self.jwt.ok_or_else(|| super::error::ServiceError::validation("jwt is required"))?,
            self.passwords.ok_or_else(|| super::error::ServiceError::validation("passwords is required"))?,
            self.refresh_token_ttl.ok_or_else(|| super::error::ServiceError::validation("refresh_token_ttl is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
