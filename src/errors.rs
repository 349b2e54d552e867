use http::StatusCode;
use serde_json::json;
use thiserror::Error;
use worker::{Error as WorkerError, Response};

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Worker(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client. Backing-store failures and
    /// other unexpected errors keep their detail out of the response body.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Unauthorized => "Unauthorized",
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::Worker(_) | AppError::Internal(_) => "Internal error",
        }
    }

    /// Converts the error into the structured JSON response the API
    /// returns for every failure: `{"error": "<message>"}` plus status.
    pub fn to_response(&self) -> worker::Result<Response> {
        let body = json!({ "error": self.public_message() });
        Ok(Response::from_json(&body)?.with_status(self.status_code().as_u16()))
    }
}
