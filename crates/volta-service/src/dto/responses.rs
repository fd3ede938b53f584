//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names and
//! shapes match what the mobile and dashboard clients already consume, so
//! optional fields serialize as explicit nulls rather than being skipped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Bare acknowledgement used by login, refresh and device mutations
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Signup response carrying the initial access token
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: String,
}

/// Logout acknowledgement
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

impl LogoutResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Current user response for session introspection
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// API Key Responses
// ============================================================================

/// Issuance response; the only time the raw key is ever returned
#[derive(Debug, Serialize)]
pub struct ApiKeyCreatedResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub id: Uuid,
}

/// API key listing item; the key digest is never exposed
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyResponse {
    pub id: Uuid,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Device Responses
// ============================================================================

/// Full device record as the dashboard consumes it
#[derive(Debug, Clone, Serialize)]
pub struct DeviceResponse {
    pub uuid: String,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub model_number: Option<String>,
    pub battery_level: Option<i32>,
    pub last_updated: DateTime<Utc>,
    pub user_id: Uuid,
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
}

/// Registration response echoing the stored device
#[derive(Debug, Serialize)]
pub struct DeviceRegisteredResponse {
    pub success: bool,
    pub device: DeviceResponse,
}

impl DeviceRegisteredResponse {
    pub fn new(device: DeviceResponse) -> Self {
        Self {
            success: true,
            device,
        }
    }
}

/// Battery readings subset for the polling widget
#[derive(Debug, Clone, Serialize)]
pub struct BatteryReadings {
    pub battery_level: Option<i32>,
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

/// Battery endpoint envelope
#[derive(Debug, Serialize)]
pub struct BatteryResponse {
    pub success: bool,
    pub data: BatteryReadings,
}

impl BatteryResponse {
    pub fn new(data: BatteryReadings) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        let status = if database_healthy { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
