//! BBB request signing.
//!
//! The server recomputes `sha1(call_name + query + secret)` and rejects the
//! request on mismatch, so this must stay plain SHA-1 over the concatenation.

use sha1::{Digest, Sha1};

/// API operations this service signs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    Create,
    Join,
}

impl ApiCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiCall::Create => "create",
            ApiCall::Join => "join",
        }
    }
}

/// Lowercase hex SHA-1 of `call_name + query + secret` (40 chars).
/// `query` must be the already-encoded string without the checksum parameter.
pub fn checksum(call_name: &str, query: &str, secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(call_name.as_bytes());
    hasher.update(query.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
