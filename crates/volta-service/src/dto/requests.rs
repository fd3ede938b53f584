//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with input constraints
//! also implement `Validate`.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// API Key Requests
// ============================================================================

/// API key issuance request; the label is a free-form client-side name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateApiKeyRequest {
    pub label: Option<String>,
}

/// API key relabel request; a missing or null label clears it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApiKeyRequest {
    pub label: Option<String>,
}

// ============================================================================
// Device Requests
// ============================================================================

/// Device registration request
///
/// The uuid is chosen by the client and becomes the device's public
/// identifier. Everything beyond uuid and name is optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterDeviceRequest {
    #[validate(length(min = 1, max = 255, message = "Device uuid is required"))]
    pub uuid: String,

    #[validate(length(min = 1, max = 255, message = "Device name is required"))]
    pub name: String,

    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
    pub os_version: Option<String>,
    pub battery_level: Option<i32>,
    pub is_charging: Option<bool>,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
}

/// Telemetry report; replaces all stored readings for the device
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTelemetryRequest {
    pub battery_level: Option<i32>,
    pub is_charging: Option<bool>,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub os_version: Option<String>,
}

/// Partial update of a device's descriptive fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
}
