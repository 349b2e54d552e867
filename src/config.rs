//! # Configuration Management
//!
//! Runtime configuration for the gateway, read once per isolate from
//! Worker bindings and shared across requests via `Arc`.
//!
//! ## Configuration Sources
//!
//! 1. **Secret binding** (`AUTH_KEY`): the shared client credential,
//!    provisioned with `wrangler secret put AUTH_KEY`
//! 2. **Constants**: the R2 bucket binding name, fixed at compile time
//!    and matched against wrangler.toml

use worker::{console_log, Env, Result};

use crate::constants::{AUTH_KEY_SECRET_NAME, STORAGE_BUCKET_NAME};
use crate::utils::key_fingerprint;

/// Immutable service configuration, injected into the router explicitly
/// rather than read through ambient globals.
#[derive(Clone, Debug)]
pub struct Config {
    /// Shared secret every authorized client presents in `Authorization`.
    pub auth_key: String,

    /// Name of the R2 bucket binding backing the gateway.
    pub bucket_name: String,
}

impl Config {
    /// Loads configuration from the Worker environment.
    ///
    /// A missing `AUTH_KEY` secret is a deployment error and fails every
    /// request until the binding is provisioned. The key fingerprint is
    /// logged so operators can tell which secret an isolate holds.
    pub fn load(env: &Env) -> Result<Self> {
        let auth_key = env.secret(AUTH_KEY_SECRET_NAME)?.to_string();

        console_log!(
            "Configuration loaded (auth key fingerprint {})",
            key_fingerprint(&auth_key)
        );

        Ok(Self {
            auth_key,
            bucket_name: STORAGE_BUCKET_NAME.to_string(),
        })
    }
}
