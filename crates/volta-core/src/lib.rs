//! # volta-core
//!
//! Domain layer containing entities, value objects, store traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ApiKey, Device, RefreshToken, User};
pub use error::DomainError;
pub use traits::{
    ApiKeyStore, DeviceMetadataPatch, DeviceStore, DeviceTelemetry, RefreshTokenStore,
    StoreResult, UserStore,
};
pub use value_objects::ClientFingerprint;
