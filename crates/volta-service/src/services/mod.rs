//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod api_key;
pub mod auth;
pub mod context;
pub mod device;
pub mod error;

// Re-export all services for convenience
pub use api_key::ApiKeyService;
pub use auth::{AuthService, IssuedSession};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use device::DeviceService;
pub use error::{ServiceError, ServiceResult};
