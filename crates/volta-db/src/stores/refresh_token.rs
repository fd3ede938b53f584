//! PostgreSQL implementation of RefreshTokenStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use volta_core::entities::RefreshToken;
use volta_core::traits::{RefreshTokenStore, StoreResult};

use crate::models::RefreshTokenModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RefreshTokenStore
#[derive(Clone)]
pub struct PgRefreshTokenStore {
    pool: PgPool,
}

impl PgRefreshTokenStore {
    /// Create a new PgRefreshTokenStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    #[instrument(skip(self, token))]
    async fn insert(&self, token: &RefreshToken) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, issued_at, expires_at, ip, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(token.id)
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.issued_at)
        .bind(token.expires_at)
        .bind(token.fingerprint.ip())
        .bind(token.fingerprint.user_agent())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token_hash))]
    async fn find_live_by_hash(&self, token_hash: &str) -> StoreResult<Option<RefreshToken>> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r#"
            SELECT id, user_id, token_hash, issued_at, expires_at, ip, user_agent
            FROM refresh_tokens
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshToken::from))
    }

    #[instrument(skip(self, prior_hash, new_hash))]
    async fn rotate(
        &self,
        id: Uuid,
        prior_hash: &str,
        new_hash: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        // The prior hash in the WHERE clause is the compare-and-swap guard:
        // of two concurrent redemptions of one secret, only the first UPDATE
        // matches a row. The fingerprint columns are left untouched.
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET token_hash = $3, issued_at = $4, expires_at = $5
            WHERE id = $1 AND token_hash = $2
            "#,
        )
        .bind(id)
        .bind(prior_hash)
        .bind(new_hash)
        .bind(issued_at)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self, token_hash))]
    async fn delete_by_hash(&self, token_hash: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
