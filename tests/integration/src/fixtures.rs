//! Test fixtures and data generators
//!
//! Request payloads and response mirrors for the REST API. Generated
//! identifiers are random rather than counter-based, so repeated runs
//! against a persistent database never collide.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        Self {
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password: "p1".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Signup response carrying the initial access token
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub token: String,
}

/// Bare acknowledgement used by login, refresh and device mutations
#[derive(Debug, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Logout acknowledgement
#[derive(Debug, Deserialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: String,
}

/// API key creation request
#[derive(Debug, Serialize)]
pub struct CreateApiKeyRequest {
    pub label: Option<String>,
}

/// API key relabel request
#[derive(Debug, Serialize)]
pub struct UpdateApiKeyRequest {
    pub label: Option<String>,
}

/// API key issuance response
#[derive(Debug, Deserialize)]
pub struct ApiKeyCreatedResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub id: Uuid,
}

/// API key listing item
#[derive(Debug, Deserialize)]
pub struct ApiKeyResponse {
    pub id: Uuid,
    pub label: Option<String>,
    pub created_at: String,
    pub last_used_at: Option<String>,
}

/// Device registration request
#[derive(Debug, Serialize)]
pub struct RegisterDeviceRequest {
    pub uuid: String,
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

impl RegisterDeviceRequest {
    pub fn unique() -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            name: "Pixel 8".to_string(),
            brand: Some("Google".to_string()),
            model: Some("Pixel 8".to_string()),
            model_number: Some("GKWS6".to_string()),
            os_version: Some("14".to_string()),
            battery_level: Some(87),
            is_charging: Some(false),
            temperature: Some(31.2),
            voltage: Some(4.35),
        }
    }
}

/// Telemetry report
#[derive(Debug, Serialize)]
pub struct UpdateTelemetryRequest {
    pub battery_level: Option<i32>,
    pub is_charging: Option<bool>,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub os_version: Option<String>,
}

/// Device metadata update
#[derive(Debug, Serialize)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
}

/// Device record as the API returns it
#[derive(Debug, Deserialize)]
pub struct DeviceResponse {
    pub uuid: String,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub model_number: Option<String>,
    pub battery_level: Option<i32>,
    pub last_updated: String,
    pub user_id: Uuid,
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
}

/// Registration response
#[derive(Debug, Deserialize)]
pub struct DeviceRegisteredResponse {
    pub success: bool,
    pub device: DeviceResponse,
}

/// Battery readings subset
#[derive(Debug, Deserialize)]
pub struct BatteryReadings {
    pub battery_level: Option<i32>,
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub last_updated: String,
}

/// Battery endpoint envelope
#[derive(Debug, Deserialize)]
pub struct BatteryResponse {
    pub success: bool,
    pub data: BatteryReadings,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
