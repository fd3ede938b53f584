//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateApiKeyRequest, LoginRequest, RegisterDeviceRequest, SignupRequest, UpdateApiKeyRequest,
    UpdateDeviceRequest, UpdateTelemetryRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiKeyCreatedResponse, ApiKeyResponse, BatteryReadings, BatteryResponse, CurrentUserResponse,
    DeviceRegisteredResponse, DeviceResponse, HealthChecks, HealthResponse, LogoutResponse,
    ReadinessResponse, SignupResponse, SuccessResponse,
};
