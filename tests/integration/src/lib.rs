//! Integration test utilities for the Volta API server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API: a throwaway server bound to an ephemeral port, an
//! HTTP client, and mirrors of the wire DTOs.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
