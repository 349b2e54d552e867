//! # Request Routing and Dispatch
//!
//! Maps an incoming HTTP method and path onto a handler and converts every
//! failure raised by inner components into a structured JSON error response.
//!
//! ## Routing Strategy
//!
//! Route resolution is a pure function from `(method, path)` to a [`Route`],
//! so the whole table is testable without HTTP transport. Two equivalent
//! shapes are served: a flat form (`/start-upload`, `/download?key=...`)
//! and the resource-nested form the production CLI drives
//! (`/uploads/create`, `/objects/:key/download`).
//!
//! ## Error Translation
//!
//! Handlers return `AppResult<Response>`; this module holds the single
//! point where an `AppError` becomes a status code plus `{"error": ...}`
//! body. Unexpected failures surface as 500 with the detail logged, never
//! echoed to the client.

use std::sync::Arc;

use worker::{Env, Method, Request, Response, Result};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::handlers;
use crate::log_data;
use crate::logging::Logger;
use crate::middleware::{AuthMiddleware, ValidationMiddleware};
use crate::utils::generate_request_id;

/// A resolved route, with any path parameters already extracted.
///
/// `Download` and `Stats` carry `None` in the flat form, where the key
/// arrives as a query parameter instead of a path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    StartUpload,
    UploadPart,
    CompleteUpload,
    Download { key: Option<String> },
    Stats { key: Option<String> },
    ListObjects,
    DeleteObject { key: String },
}

/// Maps a method and path onto a route.
///
/// A known path with the wrong method fails with 405; an unknown path
/// fails with 404.
pub fn resolve(method: &Method, path: &str) -> AppResult<Route> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["start-upload"] | ["uploads", "create"] => match method {
            Method::Post => Ok(Route::StartUpload),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["upload-part"] | ["uploads", "upload-part"] => match method {
            Method::Post => Ok(Route::UploadPart),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["complete-upload"] | ["uploads", "complete"] => match method {
            Method::Post => Ok(Route::CompleteUpload),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["download"] => match method {
            Method::Get => Ok(Route::Download { key: None }),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["stats"] => match method {
            Method::Get => Ok(Route::Stats { key: None }),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["objects"] => match method {
            Method::Get => Ok(Route::ListObjects),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["objects", key] => match method {
            Method::Delete => Ok(Route::DeleteObject {
                key: ValidationMiddleware::path_key(key)?,
            }),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["objects", key, "download"] => match method {
            Method::Get => Ok(Route::Download {
                key: Some(ValidationMiddleware::path_key(key)?),
            }),
            _ => Err(AppError::MethodNotAllowed),
        },
        ["objects", key, "stats"] => match method {
            Method::Get => Ok(Route::Stats {
                key: Some(ValidationMiddleware::path_key(key)?),
            }),
            _ => Err(AppError::MethodNotAllowed),
        },
        _ => Err(AppError::NotFound("Not found".to_string())),
    }
}

/// Handles one incoming request end to end: authentication, route
/// resolution, handler dispatch, and error translation.
pub async fn handle_request(req: Request, env: Env, config: Arc<Config>) -> Result<Response> {
    let logger = Logger::new(generate_request_id());
    let method = req.method();
    let path = req.path();

    logger.info(
        "Routing request",
        log_data!("method" => method.to_string(), "path" => &path),
    );

    match dispatch(req, env, &config, &logger).await {
        Ok(response) => Ok(response),
        Err(err) => {
            let status = err.status_code().as_u16();
            if status >= 500 {
                // Full detail stays server-side; the client sees only the
                // generic message from `to_response`.
                logger.error(
                    "Request failed",
                    log_data!(
                        "method" => method.to_string(),
                        "path" => &path,
                        "status" => status,
                        "error" => err.to_string(),
                    ),
                );
            } else {
                logger.warn(
                    "Request rejected",
                    log_data!(
                        "method" => method.to_string(),
                        "path" => &path,
                        "status" => status,
                        "error" => err.public_message(),
                    ),
                );
            }
            err.to_response()
        }
    }
}

async fn dispatch(
    req: Request,
    env: Env,
    config: &Config,
    logger: &Logger,
) -> AppResult<Response> {
    // The gate runs first: no handler logic, and in particular no
    // state-mutating R2 call, is reachable without a valid credential.
    AuthMiddleware::authorize(&req, config)?;

    let route = resolve(&req.method(), &req.path())?;
    handlers::handle(route, req, env, config, logger).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_flat_upload_routes() {
        assert_eq!(
            resolve(&Method::Post, "/start-upload").unwrap(),
            Route::StartUpload
        );
        assert_eq!(
            resolve(&Method::Post, "/upload-part").unwrap(),
            Route::UploadPart
        );
        assert_eq!(
            resolve(&Method::Post, "/complete-upload").unwrap(),
            Route::CompleteUpload
        );
    }

    #[test]
    fn resolves_nested_aliases_to_the_same_handlers() {
        assert_eq!(
            resolve(&Method::Post, "/uploads/create").unwrap(),
            Route::StartUpload
        );
        assert_eq!(
            resolve(&Method::Post, "/uploads/upload-part").unwrap(),
            Route::UploadPart
        );
        assert_eq!(
            resolve(&Method::Post, "/uploads/complete").unwrap(),
            Route::CompleteUpload
        );
        assert_eq!(
            resolve(&Method::Get, "/objects/a.txt/download").unwrap(),
            Route::Download {
                key: Some("a.txt".to_string())
            }
        );
        assert_eq!(
            resolve(&Method::Get, "/objects/a.txt/stats").unwrap(),
            Route::Stats {
                key: Some("a.txt".to_string())
            }
        );
    }

    #[test]
    fn flat_download_and_stats_read_the_key_from_the_query() {
        assert_eq!(
            resolve(&Method::Get, "/download").unwrap(),
            Route::Download { key: None }
        );
        assert_eq!(
            resolve(&Method::Get, "/stats").unwrap(),
            Route::Stats { key: None }
        );
    }

    #[test]
    fn resolves_listing_and_delete() {
        assert_eq!(resolve(&Method::Get, "/objects").unwrap(), Route::ListObjects);
        assert_eq!(
            resolve(&Method::Delete, "/objects/a.txt").unwrap(),
            Route::DeleteObject {
                key: "a.txt".to_string()
            }
        );
    }

    #[test]
    fn path_keys_are_percent_decoded() {
        assert_eq!(
            resolve(&Method::Delete, "/objects/a%20b.txt").unwrap(),
            Route::DeleteObject {
                key: "a b.txt".to_string()
            }
        );
        assert_eq!(
            resolve(&Method::Get, "/objects/dir%2Fnested.bin/download").unwrap(),
            Route::Download {
                key: Some("dir/nested.bin".to_string())
            }
        );
    }

    #[test]
    fn unknown_path_is_not_found() {
        let err = resolve(&Method::Get, "/nope").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.public_message(), "Not found");

        let err = resolve(&Method::Get, "/").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn known_path_with_wrong_method_is_rejected() {
        assert!(matches!(
            resolve(&Method::Get, "/start-upload").unwrap_err(),
            AppError::MethodNotAllowed
        ));
        assert!(matches!(
            resolve(&Method::Post, "/objects").unwrap_err(),
            AppError::MethodNotAllowed
        ));
        assert!(matches!(
            resolve(&Method::Get, "/objects/a.txt").unwrap_err(),
            AppError::MethodNotAllowed
        ));
        assert!(matches!(
            resolve(&Method::Delete, "/objects/a.txt/download").unwrap_err(),
            AppError::MethodNotAllowed
        ));
    }

    #[test]
    fn trailing_slashes_do_not_change_the_route() {
        assert_eq!(resolve(&Method::Get, "/objects/").unwrap(), Route::ListObjects);
        assert_eq!(
            resolve(&Method::Post, "/start-upload/").unwrap(),
            Route::StartUpload
        );
    }
}
