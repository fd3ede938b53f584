//! # volta-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types
pub use services::{
    ApiKeyService, AuthService, DeviceService, IssuedSession, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
