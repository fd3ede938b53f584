//! Device database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for devices table
///
/// Devices are keyed by a client-chosen uuid string rather than a
/// server-generated id, so registration must tolerate collisions.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceModel {
    pub uuid: String,
    pub user_id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
    pub os_version: Option<String>,
    pub battery_level: Option<i32>,
    pub is_charging: bool,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub last_updated: DateTime<Utc>,
}
