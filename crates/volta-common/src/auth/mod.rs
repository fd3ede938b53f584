//! Authentication primitives

mod jwt;
mod password;
mod secrets;

pub use jwt::{Claims, JwtCodec, SESSION_SCOPE};
pub use password::{hash_password, verify_password, PasswordService};
pub use secrets::{generate_opaque_token, sha256_hex, OPAQUE_TOKEN_BYTES};
