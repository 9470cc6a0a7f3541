//! Error types for the extraction server

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::download::DownloadError;
use crate::extraction::ExtractError;
use crate::ratelimit::RateLimited;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    RateLimited(#[from] RateLimited),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("PDF processing exceeded {0} seconds timeout")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            AppError::Download(DownloadError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            AppError::Download(e) => (StatusCode::BAD_REQUEST, e.kind()),
            AppError::Extraction(e @ ExtractError::PageLimitExceeded { .. }) => {
                (StatusCode::BAD_REQUEST, e.kind())
            }
            AppError::Extraction(
                e @ (ExtractError::DocumentOpenFailed(_) | ExtractError::PageUnreadable { .. }),
            ) => (StatusCode::UNPROCESSABLE_ENTITY, e.kind()),
            AppError::Extraction(e @ ExtractError::OcrEngineFailed(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.kind())
            }
            AppError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "timeout"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();

        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!("{}", other);
                } else {
                    tracing::warn!("{}", other);
                }
                other.to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        match self {
            AppError::RateLimited(limited) => {
                let retry_after = limited.retry_after.as_secs_f64().ceil().max(1.0) as u64;
                (
                    status,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    body,
                )
                    .into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
