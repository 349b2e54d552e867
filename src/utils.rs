//! # Utility Functions
//!
//! Small helpers shared across handlers: JSON response construction,
//! request identifiers for log correlation, and secret fingerprinting.

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use worker::Response;

use crate::errors::AppResult;

/// Serializes `value` into a 200 JSON response.
pub fn json_response<T: Serialize>(value: &T) -> AppResult<Response> {
    Ok(Response::from_json(value)?)
}

/// Generates a unique identifier used to correlate log lines of one request.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Short hex fingerprint of a secret, safe to log.
///
/// Lets operators confirm which key an isolate loaded without the key
/// itself ever reaching the logs.
pub fn key_fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_short_and_stable() {
        let a = key_fingerprint("test-key");
        assert_eq!(a.len(), 8);
        assert_eq!(a, key_fingerprint("test-key"));
        assert_ne!(a, key_fingerprint("other-key"));
    }
}
