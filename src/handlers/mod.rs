//! # Handlers Module
//!
//! HTTP request handlers for the gateway, split by shape: the multipart
//! upload lifecycle in [`upload`] and the single-call object operations in
//! [`object`]. All handlers are stateless request/response transformers;
//! everything that must survive across calls lives in the backing store.

use worker::{Bucket, Env, Request, Response};

use crate::config::Config;
use crate::errors::AppResult;
use crate::logging::Logger;
use crate::router::Route;

pub mod object;
pub mod upload;

/// Dispatches a resolved route to its handler.
pub async fn handle(
    route: Route,
    req: Request,
    env: Env,
    config: &Config,
    logger: &Logger,
) -> AppResult<Response> {
    match route {
        Route::StartUpload => upload::start_upload(req, &env, config, logger).await,
        Route::UploadPart => upload::upload_part(req, &env, config, logger).await,
        Route::CompleteUpload => upload::complete_upload(req, &env, config, logger).await,
        Route::Download { key } => object::download_object(req, &env, config, key).await,
        Route::Stats { key } => object::object_stats(req, &env, config, key).await,
        Route::ListObjects => object::list_objects(req, &env, config).await,
        Route::DeleteObject { key } => object::delete_object(&env, config, key, logger).await,
    }
}

/// Resolves the R2 bucket binding backing all handlers.
pub(crate) fn bucket(env: &Env, config: &Config) -> AppResult<Bucket> {
    Ok(env.bucket(&config.bucket_name)?)
}
