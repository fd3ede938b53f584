//! Domain entities - core business objects

mod api_key;
mod device;
mod refresh_token;
mod user;

pub use api_key::ApiKey;
pub use device::Device;
pub use refresh_token::RefreshToken;
pub use user::User;
