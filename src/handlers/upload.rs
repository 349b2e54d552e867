//! # Multipart Upload Coordination
//!
//! The three-phase upload protocol against R2's multipart primitives:
//! create a session, upload parts into it, complete it with a part
//! manifest. Each phase is an independent stateless call; the
//! `(key, uploadId)` pair is an opaque capability the backing store
//! re-validates on every call, so the gateway keeps no session table and
//! a crash between calls loses nothing.
//!
//! Failure semantics: any backing-store error is terminal for that call.
//! Retries belong to the uploading client, per part. Completion either
//! finalizes the whole object or fails, leaving the session open for a
//! retry.

use worker::{Env, Request, Response, UploadedPart};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::log_data;
use crate::logging::Logger;
use crate::middleware::ValidationMiddleware;
use crate::models::{CompletedPart, UploadCompleted, UploadCreated};
use crate::utils::json_response;

/// Creates a multipart session for `key`.
///
/// The returned `uploadId` must accompany every subsequent call for this
/// session, paired with the same key it was issued for.
pub async fn start_upload(
    req: Request,
    env: &Env,
    config: &Config,
    logger: &Logger,
) -> AppResult<Response> {
    let url = req.url()?;
    let key = ValidationMiddleware::require_param(&url, "key")?;

    let upload = super::bucket(env, config)?
        .create_multipart_upload(&key)
        .execute()
        .await?;
    let upload_id = upload.upload_id().await;

    logger.info(
        "Multipart upload created",
        log_data!("key" => &key, "uploadId" => &upload_id),
    );

    json_response(&UploadCreated { key, upload_id })
}

/// Ingests one part of an in-progress session. The request body carries
/// the raw chunk bytes.
///
/// Parameters and body are validated before the backing store is
/// contacted. The returned etag must be echoed back verbatim in the
/// completion manifest.
pub async fn upload_part(
    mut req: Request,
    env: &Env,
    config: &Config,
    logger: &Logger,
) -> AppResult<Response> {
    let url = req.url()?;
    let key = ValidationMiddleware::require_param(&url, "key")?;
    let upload_id = ValidationMiddleware::require_param(&url, "uploadId")?;
    let part_number = ValidationMiddleware::require_part_number(&url)?;

    let body = req.bytes().await?;
    if body.is_empty() {
        return Err(AppError::BadRequest("Empty body".to_string()));
    }

    let upload = super::bucket(env, config)?.resume_multipart_upload(&key, &upload_id)?;
    let part = upload.upload_part(part_number, body).await?;

    logger.info(
        "Part uploaded",
        log_data!("key" => &key, "uploadId" => &upload_id, "partNumber" => part_number),
    );

    json_response(&CompletedPart {
        part_number,
        etag: part.etag(),
    })
}

/// Finalizes a session from the client-supplied part manifest.
///
/// The manifest is validated for shape and non-emptiness only; whether
/// each listed part was actually uploaded is enforced by the backing
/// store's finalize call.
pub async fn complete_upload(
    mut req: Request,
    env: &Env,
    config: &Config,
    logger: &Logger,
) -> AppResult<Response> {
    let url = req.url()?;
    let key = ValidationMiddleware::require_param(&url, "key")?;
    let upload_id = ValidationMiddleware::require_param(&url, "uploadId")?;

    let body = req.bytes().await?;
    let parts = ValidationMiddleware::parse_parts(&body)?;
    let part_count = parts.len();

    let uploaded: Vec<UploadedPart> = parts
        .into_iter()
        .map(|part| UploadedPart::new(part.part_number, part.etag))
        .collect();

    let upload = super::bucket(env, config)?.resume_multipart_upload(&key, &upload_id)?;
    upload.complete(uploaded).await?;

    logger.info(
        "Multipart upload completed",
        log_data!("key" => &key, "uploadId" => &upload_id, "parts" => part_count),
    );

    json_response(&UploadCompleted { key })
}
