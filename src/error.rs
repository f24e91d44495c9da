//! Error handling for the storefront API.
//!
//! Store operations never fail: absence is an `Option`/`bool` return. The
//! route layer owns the mapping from absence and bad input to a wire error,
//! carried as a `{code, message}` JSON body with a matching HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Wire-level error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Requested identifier has no corresponding record
    NotFound,
    /// A uniqueness constraint would be violated (e.g. username taken)
    Conflict,
    /// Payload was readable but semantically invalid
    ValidationError,
    /// Malformed request parameter
    InvalidParams,
    /// Unexpected server-side failure
    InternalError,
}

impl ErrorCode {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ValidationError | ErrorCode::InvalidParams => StatusCode::BAD_REQUEST,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error category for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "resource_not_found",
            ErrorCode::Conflict => "conflict",
            ErrorCode::ValidationError | ErrorCode::InvalidParams => "client_error",
            ErrorCode::InternalError => "server_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())
    }
}

/// API-facing error with its wire code.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{entity} {id} not found"))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        tracing::debug!(
            code = ?self.code,
            category = self.code.category(),
            message = %self.message,
            "request failed"
        );
        (
            status,
            Json(ErrorBody {
                code: self.code,
                message: &self.message,
            }),
        )
            .into_response()
    }
}
