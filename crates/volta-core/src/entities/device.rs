//! Device entity - a battery-reporting client registered by a user

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered device and its last reported battery readings.
///
/// The `uuid` is chosen by the client at registration time and is the
/// public identifier used in URLs; the database row is addressed by the
/// (`uuid`, `user_id`) pair so one user can never touch another's device.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
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
