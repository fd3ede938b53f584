//! HTTP request handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod api_keys;
pub mod auth;
pub mod devices;
pub mod health;
