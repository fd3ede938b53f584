//! Database models - SQLx-compatible structs for PostgreSQL tables

mod api_key;
mod device;
mod refresh_token;
mod user;

pub use api_key::ApiKeyModel;
pub use device::DeviceModel;
pub use refresh_token::RefreshTokenModel;
pub use user::UserModel;
