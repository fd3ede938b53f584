//! PostgreSQL implementation of ApiKeyStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use volta_core::entities::ApiKey;
use volta_core::traits::{ApiKeyStore, StoreResult};

use crate::models::ApiKeyModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ApiKeyStore
#[derive(Clone)]
pub struct PgApiKeyStore {
    pool: PgPool,
}

impl PgApiKeyStore {
    /// Create a new PgApiKeyStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyStore for PgApiKeyStore {
    #[instrument(skip(self, key))]
    async fn insert(&self, key: &ApiKey) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (id, user_id, key_hash, label, created_at, last_used_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(key.id)
        .bind(key.user_id)
        .bind(&key.key_hash)
        .bind(&key.label)
        .bind(key.created_at)
        .bind(key.last_used_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, key_hash))]
    async fn find_by_hash(&self, key_hash: &str) -> StoreResult<Option<ApiKey>> {
        let result = sqlx::query_as::<_, ApiKeyModel>(
            r#"
            SELECT id, user_id, key_hash, label, created_at, last_used_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ApiKey::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<ApiKey>> {
        let results = sqlx::query_as::<_, ApiKeyModel>(
            r#"
            SELECT id, user_id, key_hash, label, created_at, last_used_at
            FROM api_keys
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ApiKey::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_label(
        &self,
        id: Uuid,
        user_id: Uuid,
        label: Option<&str>,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET label = $3
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(label)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid, user_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM api_keys WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn touch_last_used(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE api_keys SET last_used_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
