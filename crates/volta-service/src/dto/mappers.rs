//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use volta_core::entities::{ApiKey, Device, User};

use super::responses::{ApiKeyResponse, BatteryReadings, CurrentUserResponse, DeviceResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// API Key Mappers
// ============================================================================

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id,
            label: key.label.clone(),
            created_at: key.created_at,
            last_used_at: key.last_used_at,
        }
    }
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self::from(&key)
    }
}

// ============================================================================
// Device Mappers
// ============================================================================

impl From<&Device> for DeviceResponse {
    fn from(device: &Device) -> Self {
        Self {
            uuid: device.uuid.clone(),
            name: device.name.clone(),
            brand: device.brand.clone(),
            model: device.model.clone(),
            os_version: device.os_version.clone(),
            model_number: device.model_number.clone(),
            battery_level: device.battery_level,
            last_updated: device.last_updated,
            user_id: device.user_id,
            is_charging: device.is_charging,
            temperature: device.temperature,
            voltage: device.voltage,
        }
    }
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self::from(&device)
    }
}

impl From<&Device> for BatteryReadings {
    fn from(device: &Device) -> Self {
        Self {
            battery_level: device.battery_level,
            is_charging: device.is_charging,
            temperature: device.temperature,
            voltage: device.voltage,
            last_updated: device.last_updated,
        }
    }
}
