//! # UDL Worker
//!
//! An authenticated object storage gateway built with Rust and Cloudflare
//! Workers. Clients upload large files as bounded-size parts through R2's
//! multipart protocol and read them back with single-call operations, all
//! behind a shared-secret authentication gate.
//!
//! ## Architecture
//!
//! - **Router**: maps method + path onto handlers and owns the single
//!   error-to-response translation
//! - **Middleware**: the authentication gate and parameter validation
//! - **Handlers**: multipart upload coordination and object access
//! - **Config**: bindings and the shared secret, loaded once per isolate
//! - **Models**: serde wire types shared with the CLI client
//!
//! The gateway holds no state between requests. Multipart session state
//! (upload ids, part etags) is owned entirely by R2, which is what makes
//! the worker horizontally scalable and crash-safe mid-upload.
//!
//! ## Routes
//!
//! ```text
//! POST   /start-upload?key=k                  - create a multipart session
//! POST   /upload-part?key&uploadId&partNumber - upload one part (raw body)
//! POST   /complete-upload?key&uploadId        - finalize from a part manifest
//! GET    /download?key=k                      - fetch object bytes
//! GET    /stats?key=k                         - fetch object metadata
//! GET    /objects?prefix=p                    - list objects (first page)
//! DELETE /objects/:key                        - delete an object
//! ```
//!
//! The resource-nested aliases (`/uploads/create`, `/objects/:key/download`,
//! `/objects/:key/stats`) dispatch to the same handlers.

use std::sync::{Arc, OnceLock};
use worker::*;

mod config;
mod constants;
mod errors;
mod handlers;
mod logging;
mod middleware;
mod models;
mod router;
mod utils;

use config::Config;

static CONFIG_CACHE: OnceLock<Arc<Config>> = OnceLock::new();

/// Main entry point for the Cloudflare Worker.
///
/// Sets up panic reporting, loads configuration (cached per isolate), and
/// delegates to the router. Every failure below this point is converted
/// into a structured JSON error response by the router.
#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    let config = load_config(&env)?;

    router::handle_request(req, env, config).await
}

fn load_config(env: &Env) -> Result<Arc<Config>> {
    if let Some(config) = CONFIG_CACHE.get() {
        return Ok(config.clone());
    }

    let config = Arc::new(Config::load(env)?);
    let _ = CONFIG_CACHE.set(config.clone());
    Ok(config)
}
