//! Entity to model mappers
//!
//! This module provides conversions between domain entities (volta-core) and
//! database models: `From<Model> for Entity` turns database rows into domain
//! objects. Inserts bind entity fields directly, so no insert structs exist.

mod api_key;
mod device;
mod refresh_token;
mod user;
