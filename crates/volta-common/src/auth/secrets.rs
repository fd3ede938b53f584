//! Opaque secret generation and digesting
//!
//! Refresh tokens and API keys are opaque: a random string with no decodable
//! structure. Only the SHA-256 digest ever reaches the database, so a leaked
//! table cannot be replayed against the API.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Random bytes per opaque secret (256 bits)
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// Generate a URL-safe opaque secret from 256 bits of OS randomness
#[must_use]
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Lowercase-hex SHA-256 digest of the UTF-8 encoding of `input`
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
