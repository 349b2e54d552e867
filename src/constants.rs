//! # Application Constants
//!
//! Binding names and protocol limits used throughout the gateway.
//! Binding names must match the deployment configuration in wrangler.toml.

/// R2 bucket binding backing all object and multipart operations.
pub const STORAGE_BUCKET_NAME: &str = "STORAGE_BUCKET";

/// Secret binding holding the shared authentication key.
pub const AUTH_KEY_SECRET_NAME: &str = "AUTH_KEY";

/// Header carrying the client credential.
pub const AUTH_HEADER: &str = "Authorization";

/// Listing responses return at most this many entries, first page only.
pub const MAX_LIST_LIMIT: u32 = 1000;
