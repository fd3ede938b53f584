//! Authentication service
//!
//! Handles signup, login, refresh token rotation, and logout.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use volta_common::auth::{generate_opaque_token, sha256_hex};
use volta_common::AppError;
use volta_core::entities::{RefreshToken, User};
use volta_core::{ClientFingerprint, DomainError};

use crate::dto::{LoginRequest, SignupRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Credentials minted for one authenticated session.
///
/// `refresh_secret` is the only copy of the raw opaque secret; the store
/// holds just its digest. The caller moves both tokens into cookies and
/// drops this value.
pub struct IssuedSession {
    pub access_token: String,
    pub refresh_secret: String,
    pub access_token_ttl: i64,
    pub refresh_token_ttl: i64,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish_non_exhaustive()
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and open their first session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(
        &self,
        request: SignupRequest,
        fingerprint: ClientFingerprint,
    ) -> ServiceResult<IssuedSession> {
        // Check if email already exists
        if self.ctx.user_store().email_exists(&request.email).await? {
            return Err(ServiceError::App(AppError::EmailTaken));
        }

        // Hash password
        let password_hash = self
            .ctx
            .passwords()
            .hash(&request.password)
            .map_err(ServiceError::from)?;

        let user = User::new(request.email);

        // Save to database. The existence check above races with concurrent
        // signups, so the unique constraint is still the authority.
        self.ctx
            .user_store()
            .insert(&user, &password_hash)
            .await
            .map_err(|e| match e {
                DomainError::EmailAlreadyExists => ServiceError::App(AppError::EmailTaken),
                other => ServiceError::Domain(other),
            })?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_session(user.id, fingerprint).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(
        &self,
        request: LoginRequest,
        fingerprint: ClientFingerprint,
    ) -> ServiceResult<IssuedSession> {
        // Find user by email
        let user = self
            .ctx
            .user_store()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_store()
            .password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Verify password
        if let Err(e) = self
            .ctx
            .passwords()
            .verify_or_error(&request.password, &password_hash)
        {
            if matches!(e, AppError::InvalidCredentials) {
                warn!(user_id = %user.id, "Login failed: invalid password");
            }
            return Err(ServiceError::App(e));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_session(user.id, fingerprint).await
    }

    /// Redeem a refresh secret, rotating the stored record in place
    #[instrument(skip(self, presented_secret, fingerprint), fields(client = %fingerprint))]
    pub async fn refresh(
        &self,
        presented_secret: &str,
        fingerprint: &ClientFingerprint,
    ) -> ServiceResult<IssuedSession> {
        let presented_hash = sha256_hex(presented_secret);

        // Only live rows resolve; expired and already-rotated secrets both
        // fall through to the same rejection.
        let token = self
            .ctx
            .refresh_token_store()
            .find_live_by_hash(&presented_hash)
            .await?
            .ok_or_else(|| {
                warn!("Refresh failed: unknown or expired token");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // A fingerprint mismatch rejects without rotating, so the original
        // client's secret keeps working.
        if !token.matches_fingerprint(fingerprint) {
            warn!(user_id = %token.user_id, "Refresh rejected: fingerprint mismatch");
            return Err(ServiceError::App(AppError::SuspiciousClient));
        }

        let new_secret = generate_opaque_token();
        let new_hash = sha256_hex(&new_secret);
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ctx.refresh_token_ttl());

        let rotated = self
            .ctx
            .refresh_token_store()
            .rotate(token.id, &token.token_hash, &new_hash, now, expires_at)
            .await?;

        if !rotated {
            // Lost a race against a concurrent redemption of the same secret
            warn!(user_id = %token.user_id, "Refresh failed: token already rotated");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let access_token = self
            .ctx
            .jwt()
            .sign_session(token.user_id)
            .map_err(ServiceError::from)?;

        info!(user_id = %token.user_id, "Session refreshed");

        Ok(IssuedSession {
            access_token,
            refresh_secret: new_secret,
            access_token_ttl: self.ctx.jwt().access_token_ttl(),
            refresh_token_ttl: self.ctx.refresh_token_ttl(),
        })
    }

    /// Revoke the presented refresh secret, if any.
    ///
    /// Succeeds whether or not a matching record existed; logout is
    /// idempotent.
    #[instrument(skip(self, presented_secret))]
    pub async fn logout(&self, presented_secret: Option<&str>) -> ServiceResult<()> {
        if let Some(secret) = presented_secret {
            let removed = self
                .ctx
                .refresh_token_store()
                .delete_by_hash(&sha256_hex(secret))
                .await?;
            info!(removed, "Logout revoked refresh token");
        }

        Ok(())
    }

    /// Load the authenticated user's account record
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Uuid) -> ServiceResult<User> {
        self.ctx
            .user_store()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Sign an access token and persist a fresh refresh token record
    async fn issue_session(
        &self,
        user_id: Uuid,
        fingerprint: ClientFingerprint,
    ) -> ServiceResult<IssuedSession> {
        let access_token = self
            .ctx
            .jwt()
            .sign_session(user_id)
            .map_err(ServiceError::from)?;

        let refresh_secret = generate_opaque_token();
        let token = RefreshToken::issue(
            user_id,
            sha256_hex(&refresh_secret),
            self.ctx.refresh_token_ttl(),
            fingerprint,
        );
        self.ctx.refresh_token_store().insert(&token).await?;

        Ok(IssuedSession {
            access_token,
            refresh_secret,
            access_token_ttl: self.ctx.jwt().access_token_ttl(),
            refresh_token_ttl: self.ctx.refresh_token_ttl(),
        })
    }
}
