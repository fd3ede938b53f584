//! RS256 JWT codec
//!
//! Produces and validates compact signed tokens using the `jsonwebtoken`
//! crate. Signing uses the RSA private key; verification needs only the
//! public key, so a separate service could validate tokens without being
//! able to mint them.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Scope claim for interactively authenticated users
pub const SESSION_SCOPE: &str = "user";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user ID
    pub user_id: Uuid,
    /// Authority scope, `"user"` for interactive sessions
    pub scope: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token ID
    pub jti: String,
}

impl Claims {
    /// Check if the token is at or past its expiry
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Codec for signing and verifying RS256 access tokens
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: i64,
}

impl JwtCodec {
    /// Create a codec from PEM-encoded RSA keys
    ///
    /// # Errors
    /// Returns an error if either PEM is not a valid RSA key
    pub fn from_pem(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_ttl: i64,
    ) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| AppError::Config(format!("invalid RSA private key: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| AppError::Config(format!("invalid RSA public key: {e}")))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            access_token_ttl,
        })
    }

    /// Configured access-token lifetime in seconds
    #[must_use]
    pub fn access_token_ttl(&self) -> i64 {
        self.access_token_ttl
    }

    /// Sign a session access token for a user with the configured lifetime
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign_session(&self, user_id: Uuid) -> Result<String, AppError> {
        self.sign(user_id, SESSION_SCOPE, self.access_token_ttl, None)
    }

    /// Sign a token with explicit scope, lifetime, and optional token ID.
    /// A fresh random `jti` is generated when none is supplied.
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign(
        &self,
        user_id: Uuid,
        scope: &str,
        expires_in: i64,
        jti: Option<String>,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id,
            scope: scope.to_string(),
            iat: now,
            exp: now + expires_in,
            jti: jti.unwrap_or_else(|| Uuid::new_v4().to_string()),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Verify a token's signature and expiry, returning its claims
    ///
    /// # Errors
    /// `MalformedToken` if the compact form cannot be parsed,
    /// `InvalidSignature` if signature verification fails,
    /// `TokenExpired` if `exp` has passed
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature
                    | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        AppError::InvalidSignature
                    }
                    _ => AppError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}
