//! Custom Axum extractors
//!
//! Extractors for authentication, client fingerprinting, and validated
//! request bodies.

pub mod auth;
pub mod validated;

pub use auth::{ClientInfo, DeviceIdentity, Session};
pub use validated::ValidatedJson;
