//! Store implementations
//!
//! PostgreSQL implementations of the store traits defined in volta-core.
//! Each store handles database operations for a specific domain entity.

mod api_key;
mod device;
mod error;
mod refresh_token;
mod user;

pub use api_key::PgApiKeyStore;
pub use device::PgDeviceStore;
pub use refresh_token::PgRefreshTokenStore;
pub use user::PgUserStore;
