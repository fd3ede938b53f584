//! Value objects - immutable types that represent domain concepts

mod fingerprint;

pub use fingerprint::ClientFingerprint;
