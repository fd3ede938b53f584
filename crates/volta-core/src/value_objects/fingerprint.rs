//! Client fingerprint - binds a refresh token to the client that obtained it

use std::fmt;

/// Origin fingerprint captured when a refresh token is issued.
///
/// A refresh token may only be redeemed by a client presenting the same
/// source IP and User-Agent it was issued to. Either component may be
/// empty when the edge did not forward it; an empty component still has
/// to match exactly on redemption.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientFingerprint {
    ip: String,
    user_agent: String,
}

impl ClientFingerprint {
    pub fn new(ip: String, user_agent: String) -> Self {
        Self { ip, user_agent }
    }

    #[inline]
    pub fn ip(&self) -> &str {
        &self.ip
    }

    #[inline]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

// Display renders the IP only; user agents are long and end up in logs.
impl fmt::Display for ClientFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}
