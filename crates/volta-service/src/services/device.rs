//! Device service
//!
//! Registration, listing, battery reads, and updates for a user's devices.

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;
use volta_core::entities::Device;
use volta_core::traits::{DeviceMetadataPatch, DeviceTelemetry};
use volta_core::DomainError;

use crate::dto::{
    BatteryReadings, BatteryResponse, DeviceRegisteredResponse, DeviceResponse,
    RegisterDeviceRequest, UpdateDeviceRequest, UpdateTelemetryRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Device service
pub struct DeviceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DeviceService<'a> {
    /// Create a new DeviceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the user's devices, most recently updated first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> ServiceResult<Vec<DeviceResponse>> {
        let devices = self.ctx.device_store().list_for_user(user_id).await?;

        Ok(devices.iter().map(DeviceResponse::from).collect())
    }

    /// Register a new device under the user's account
    #[instrument(skip(self, request), fields(uuid = %request.uuid))]
    pub async fn register(
        &self,
        user_id: Uuid,
        request: RegisterDeviceRequest,
    ) -> ServiceResult<DeviceRegisteredResponse> {
        let device = Device {
            uuid: request.uuid,
            user_id,
            name: request.name,
            brand: request.brand,
            model: request.model,
            model_number: request.model_number,
            os_version: request.os_version,
            battery_level: request.battery_level,
            is_charging: request.is_charging.unwrap_or(false),
            temperature: request.temperature,
            voltage: request.voltage,
            last_updated: Utc::now(),
        };

        self.ctx.device_store().insert(&device).await?;

        info!(user_id = %user_id, "Device registered");

        Ok(DeviceRegisteredResponse::new(DeviceResponse::from(&device)))
    }

    /// Read one device's battery state
    #[instrument(skip(self))]
    pub async fn battery(&self, user_id: Uuid, uuid: &str) -> ServiceResult<BatteryResponse> {
        let device = self
            .ctx
            .device_store()
            .find_by_uuid_and_user(uuid, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Device", uuid))?;

        Ok(BatteryResponse::new(BatteryReadings::from(&device)))
    }

    /// Overwrite a device's battery readings with a fresh report
    #[instrument(skip(self, request))]
    pub async fn update_telemetry(
        &self,
        user_id: Uuid,
        uuid: &str,
        request: UpdateTelemetryRequest,
    ) -> ServiceResult<()> {
        let telemetry = DeviceTelemetry {
            battery_level: request.battery_level,
            is_charging: request.is_charging.unwrap_or(false),
            temperature: request.temperature,
            voltage: request.voltage,
            os_version: request.os_version,
        };

        let rows = self
            .ctx
            .device_store()
            .update_telemetry(uuid, user_id, &telemetry)
            .await?;

        if rows == 0 {
            return Err(ServiceError::not_found("Device", uuid));
        }

        debug!("Device telemetry updated");
        Ok(())
    }

    /// Patch a device's descriptive fields
    #[instrument(skip(self, request))]
    pub async fn update_metadata(
        &self,
        user_id: Uuid,
        uuid: &str,
        request: UpdateDeviceRequest,
    ) -> ServiceResult<()> {
        let patch = DeviceMetadataPatch {
            name: request.name,
            brand: request.brand,
            model: request.model,
            model_number: request.model_number,
        };

        if patch.is_empty() {
            return Err(ServiceError::validation("No valid fields to update"));
        }

        let rows = self
            .ctx
            .device_store()
            .update_metadata(uuid, user_id, &patch)
            .await?;

        if rows == 0 {
            return Err(ServiceError::not_found("Device", uuid));
        }

        info!("Device metadata updated");
        Ok(())
    }

    /// Delete a device. Succeeds whether or not the device existed
    /// under this user.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, uuid: &str) -> ServiceResult<()> {
        let rows = self.ctx.device_store().delete(uuid, user_id).await?;

        debug!(rows, "Device deletion applied");
        Ok(())
    }

    /// Confirm the device exists and belongs to this user.
    ///
    /// Used by the API-key authorization path, where the key names the
    /// owner and the URL names the device; the two must agree.
    #[instrument(skip(self))]
    pub async fn verify_ownership(&self, user_id: Uuid, uuid: &str) -> ServiceResult<()> {
        self.ctx
            .device_store()
            .find_by_uuid_and_user(uuid, user_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::NotDeviceOwner))?;

        Ok(())
    }
}
