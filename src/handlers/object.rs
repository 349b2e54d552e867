//! # Object Access Handlers
//!
//! Single-call operations against stored objects: list, download, stats,
//! delete. Downloads stream the body rather than buffering it, so object
//! size is bounded by R2 rather than by worker memory.

use worker::{Env, Headers, Request, Response};

use crate::config::Config;
use crate::constants::MAX_LIST_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::log_data;
use crate::logging::Logger;
use crate::middleware::ValidationMiddleware;
use crate::models::{ObjectStats, ObjectSummary};
use crate::utils::json_response;

/// Resolves the target key from the path parameter (nested route shape)
/// or the `key` query parameter (flat shape).
fn target_key(req: &Request, path_key: Option<String>) -> AppResult<String> {
    match path_key {
        Some(key) => Ok(key),
        None => ValidationMiddleware::require_param(&req.url()?, "key"),
    }
}

/// Lists objects in the bucket's native order, optionally filtered by
/// prefix, capped at the first page.
pub async fn list_objects(req: Request, env: &Env, config: &Config) -> AppResult<Response> {
    let url = req.url()?;

    let mut list = super::bucket(env, config)?.list().limit(MAX_LIST_LIMIT);
    if let Some(prefix) = ValidationMiddleware::optional_param(&url, "prefix") {
        list = list.prefix(prefix);
    }
    let listing = list.execute().await?;

    let entries: Vec<ObjectSummary> = listing
        .objects()
        .into_iter()
        .map(|object| ObjectSummary {
            key: object.key(),
            size: object.size(),
            etag: object.etag(),
        })
        .collect();

    json_response(&entries)
}

/// Streams an object's bytes with its content metadata copied onto the
/// response headers.
pub async fn download_object(
    req: Request,
    env: &Env,
    config: &Config,
    path_key: Option<String>,
) -> AppResult<Response> {
    let key = target_key(&req, path_key)?;

    let object = super::bucket(env, config)?
        .get(&key)
        .execute()
        .await?
        .ok_or_else(|| AppError::NotFound("Object not found".to_string()))?;

    let headers = Headers::new();
    if let Some(content_type) = object.http_metadata().content_type {
        headers.set("Content-Type", &content_type)?;
    }
    headers.set("Content-Length", &object.size().to_string())?;
    headers.set("ETag", &object.http_etag())?;

    let body = object
        .body()
        .ok_or_else(|| AppError::Internal("Backing store returned no body".to_string()))?;

    Ok(Response::from_stream(body.stream()?)?.with_headers(headers))
}

/// Returns an object's size and etag without transferring body bytes.
pub async fn object_stats(
    req: Request,
    env: &Env,
    config: &Config,
    path_key: Option<String>,
) -> AppResult<Response> {
    let key = target_key(&req, path_key)?;

    let object = super::bucket(env, config)?
        .head(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Object not found".to_string()))?;

    json_response(&ObjectStats {
        size: object.size(),
        etag: object.etag(),
    })
}

/// Deletes unconditionally; removing an absent key is not an error.
pub async fn delete_object(
    env: &Env,
    config: &Config,
    key: String,
    logger: &Logger,
) -> AppResult<Response> {
    super::bucket(env, config)?.delete(&key).await?;

    logger.info("Object deleted", log_data!("key" => &key));

    Ok(Response::empty()?.with_status(204))
}
