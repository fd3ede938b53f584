//! PostgreSQL implementation of DeviceStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use volta_core::entities::Device;
use volta_core::error::DomainError;
use volta_core::traits::{DeviceMetadataPatch, DeviceStore, DeviceTelemetry, StoreResult};

use crate::models::DeviceModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of DeviceStore
#[derive(Clone)]
pub struct PgDeviceStore {
    pool: PgPool,
}

impl PgDeviceStore {
    /// Create a new PgDeviceStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for PgDeviceStore {
    #[instrument(skip(self))]
    async fn find_by_uuid_and_user(&self, uuid: &str, user_id: Uuid) -> StoreResult<Option<Device>> {
        let result = sqlx::query_as::<_, DeviceModel>(
            r#"
            SELECT uuid, user_id, name, brand, model, model_number, os_version,
                   battery_level, is_charging, temperature, voltage, last_updated
            FROM devices
            WHERE uuid = $1 AND user_id = $2
            "#,
        )
        .bind(uuid)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Device::from))
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Device>> {
        let results = sqlx::query_as::<_, DeviceModel>(
            r#"
            SELECT uuid, user_id, name, brand, model, model_number, os_version,
                   battery_level, is_charging, temperature, voltage, last_updated
            FROM devices
            WHERE user_id = $1
            ORDER BY last_updated DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Device::from).collect())
    }

    #[instrument(skip(self, device))]
    async fn insert(&self, device: &Device) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO devices (uuid, user_id, name, brand, model, model_number, os_version,
                                 battery_level, is_charging, temperature, voltage, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&device.uuid)
        .bind(device.user_id)
        .bind(&device.name)
        .bind(&device.brand)
        .bind(&device.model)
        .bind(&device.model_number)
        .bind(&device.os_version)
        .bind(device.battery_level)
        .bind(device.is_charging)
        .bind(device.temperature)
        .bind(device.voltage)
        .bind(device.last_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let uuid = device.uuid.clone();
            map_unique_violation(e, || DomainError::DeviceAlreadyExists(uuid))
        })?;

        Ok(())
    }

    #[instrument(skip(self, telemetry))]
    async fn update_telemetry(
        &self,
        uuid: &str,
        user_id: Uuid,
        telemetry: &DeviceTelemetry,
    ) -> StoreResult<u64> {
        // Telemetry reports replace every reading; an absent field clears the
        // stored value rather than keeping a stale one.
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET battery_level = $3, is_charging = $4, temperature = $5, voltage = $6,
                os_version = $7, last_updated = NOW()
            WHERE uuid = $1 AND user_id = $2
            "#,
        )
        .bind(uuid)
        .bind(user_id)
        .bind(telemetry.battery_level)
        .bind(telemetry.is_charging)
        .bind(telemetry.temperature)
        .bind(telemetry.voltage)
        .bind(&telemetry.os_version)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, patch))]
    async fn update_metadata(
        &self,
        uuid: &str,
        user_id: Uuid,
        patch: &DeviceMetadataPatch,
    ) -> StoreResult<u64> {
        // COALESCE keeps columns the patch omitted, so one statement covers
        // every field combination.
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET name = COALESCE($3, name),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                model_number = COALESCE($6, model_number)
            WHERE uuid = $1 AND user_id = $2
            "#,
        )
        .bind(uuid)
        .bind(user_id)
        .bind(&patch.name)
        .bind(&patch.brand)
        .bind(&patch.model)
        .bind(&patch.model_number)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, uuid: &str, user_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM devices WHERE uuid = $1 AND user_id = $2
            "#,
        )
        .bind(uuid)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
