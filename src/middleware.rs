//! # Request Middleware
//!
//! The authentication gate and parameter validation for the gateway.
//! Both run before any backing-store call: authentication before routing,
//! validation inside each handler before the first R2 operation.
//!
//! ## Components
//!
//! - **Auth gate**: exact-match shared-secret check on `Authorization`
//! - **Parameter validation**: typed extraction of query parameters,
//!   path keys, and the completion manifest body

use sha2::{Digest, Sha256};
use worker::{Request, Url};

use crate::config::Config;
use crate::constants::AUTH_HEADER;
use crate::errors::{AppError, AppResult};
use crate::models::CompletedPart;

/// Authentication gate comparing the request credential against the
/// configured shared secret.
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Verifies the request credential. Runs before route resolution, so
    /// no handler logic is reachable without passing this check.
    pub fn authorize(req: &Request, config: &Config) -> AppResult<()> {
        let supplied = req.headers().get(AUTH_HEADER)?;
        Self::check_key(supplied.as_deref(), &config.auth_key)
    }

    /// Compares SHA-256 digests rather than the raw strings so the
    /// comparison cost does not depend on where the two values first
    /// differ. A missing credential and a wrong one are indistinguishable
    /// to the client.
    pub fn check_key(supplied: Option<&str>, expected: &str) -> AppResult<()> {
        let supplied = supplied.ok_or(AppError::Unauthorized)?;

        let supplied_digest = Sha256::digest(supplied.as_bytes());
        let expected_digest = Sha256::digest(expected.as_bytes());
        if supplied_digest != expected_digest {
            return Err(AppError::Unauthorized);
        }

        Ok(())
    }
}

/// Typed extraction of request parameters. Pure functions with no side
/// effects; each returns a typed value or a structured rejection.
pub struct ValidationMiddleware;

impl ValidationMiddleware {
    /// Reads a query parameter, treating an empty value as absent.
    pub fn optional_param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    /// Reads a required query parameter, citing the field name on failure.
    pub fn require_param(url: &Url, name: &str) -> AppResult<String> {
        Self::optional_param(url, name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {name}")))
    }

    /// Reads `partNumber` as a positive base-10 integer. R2 caps sessions
    /// at 10000 parts, so `u16` covers the full range.
    pub fn require_part_number(url: &Url) -> AppResult<u16> {
        let raw = Self::require_param(url, "partNumber")?;
        match raw.parse::<u16>() {
            Ok(number) if number > 0 => Ok(number),
            _ => Err(AppError::BadRequest("Invalid partNumber".to_string())),
        }
    }

    /// Validates the completion manifest before it is forwarded to the
    /// backing store, avoiding a round trip on malformed input. Whether
    /// each listed part was actually uploaded is the backing store's
    /// contract to enforce.
    pub fn parse_parts(body: &[u8]) -> AppResult<Vec<CompletedPart>> {
        let parts: Vec<CompletedPart> = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest("Invalid parts".to_string()))?;

        if parts.is_empty() {
            return Err(AppError::BadRequest("No parts".to_string()));
        }

        Ok(parts)
    }

    /// Percent-decodes an object key taken from a path segment.
    pub fn path_key(segment: &str) -> AppResult<String> {
        let decoded = urlencoding::decode(segment)
            .map_err(|_| AppError::BadRequest("Invalid key".to_string()))?;

        if decoded.is_empty() {
            return Err(AppError::BadRequest("Missing key".to_string()));
        }

        Ok(decoded.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn check_key_accepts_exact_match() {
        assert!(AuthMiddleware::check_key(Some("s3cret"), "s3cret").is_ok());
    }

    #[test]
    fn check_key_rejects_wrong_value() {
        let err = AuthMiddleware::check_key(Some("guess"), "s3cret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn check_key_rejects_missing_credential() {
        let err = AuthMiddleware::check_key(None, "s3cret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn require_param_reads_query_value() {
        let url = url("https://gw.example/start-upload?key=a.txt");
        assert_eq!(
            ValidationMiddleware::require_param(&url, "key").unwrap(),
            "a.txt"
        );
    }

    #[test]
    fn require_param_cites_the_missing_field() {
        let url = url("https://gw.example/start-upload");
        let err = ValidationMiddleware::require_param(&url, "key").unwrap_err();
        assert_eq!(err.public_message(), "Missing key");
    }

    #[test]
    fn require_param_treats_empty_value_as_missing() {
        let url = url("https://gw.example/start-upload?key=");
        let err = ValidationMiddleware::require_param(&url, "key").unwrap_err();
        assert_eq!(err.public_message(), "Missing key");
    }

    #[test]
    fn part_number_parses_base10() {
        let url = url("https://gw.example/upload-part?partNumber=12");
        assert_eq!(ValidationMiddleware::require_part_number(&url).unwrap(), 12);
    }

    #[test]
    fn part_number_rejects_non_numeric() {
        let url = url("https://gw.example/upload-part?partNumber=x");
        let err = ValidationMiddleware::require_part_number(&url).unwrap_err();
        assert_eq!(err.public_message(), "Invalid partNumber");
    }

    #[test]
    fn part_number_rejects_zero() {
        let url = url("https://gw.example/upload-part?partNumber=0");
        let err = ValidationMiddleware::require_part_number(&url).unwrap_err();
        assert_eq!(err.public_message(), "Invalid partNumber");
    }

    #[test]
    fn part_number_absent_cites_the_field() {
        let url = url("https://gw.example/upload-part?key=a.txt");
        let err = ValidationMiddleware::require_part_number(&url).unwrap_err();
        assert_eq!(err.public_message(), "Missing partNumber");
    }

    #[test]
    fn parse_parts_accepts_manifest() {
        let body = br#"[{"partNumber":1,"etag":"E1"},{"partNumber":2,"etag":"E2"}]"#;
        let parts = ValidationMiddleware::parse_parts(body).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].part_number, 1);
        assert_eq!(parts[0].etag, "E1");
    }

    #[test]
    fn parse_parts_rejects_empty_list() {
        let err = ValidationMiddleware::parse_parts(b"[]").unwrap_err();
        assert_eq!(err.public_message(), "No parts");
    }

    #[test]
    fn parse_parts_rejects_wrong_types() {
        let body = br#"[{"partNumber":"x","etag":"E1"}]"#;
        let err = ValidationMiddleware::parse_parts(body).unwrap_err();
        assert_eq!(err.public_message(), "Invalid parts");
    }

    #[test]
    fn parse_parts_rejects_non_array_body() {
        let err = ValidationMiddleware::parse_parts(b"{\"partNumber\":1}").unwrap_err();
        assert_eq!(err.public_message(), "Invalid parts");
    }

    #[test]
    fn path_key_percent_decodes() {
        assert_eq!(
            ValidationMiddleware::path_key("a%20b.txt").unwrap(),
            "a b.txt"
        );
    }

    #[test]
    fn path_key_rejects_empty_segment() {
        let err = ValidationMiddleware::path_key("").unwrap_err();
        assert_eq!(err.public_message(), "Missing key");
    }
}
