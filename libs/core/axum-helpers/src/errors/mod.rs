pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Body returned for every error response.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "The employee is already saved: ahincho@unsa.edu.pe"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AppError::SerdeJson(e) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "JSON serialization error: {:?}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    ErrorCode::InternalError,
                )
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::Io(e) => {
                tracing::error!(error_code = ErrorCode::IoError.code(), "I/O error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::IoError.default_message().to_string(),
                    ErrorCode::IoError,
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), ErrorCode::JsonExtraction)
            }
            AppError::InvalidId(raw) => {
                tracing::warn!(error_code = ErrorCode::InvalidId.code(), id = %raw, "Invalid identifier");
                (
                    StatusCode::BAD_REQUEST,
                    format!("{}: {}", ErrorCode::InvalidId.default_message(), raw),
                    ErrorCode::InvalidId,
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, ErrorCode::NotFound)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                (StatusCode::CONFLICT, msg, ErrorCode::Conflict)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    ErrorCode::InternalError,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg, ErrorCode::ServiceUnavailable)
            }
        };

        error_response(status, message, code)
    }
}

/// Maps a SeaORM error to status, message and code. Driver details are
/// logged, never sent to the client.
fn map_db_error(error: &DbErr) -> (StatusCode, String, ErrorCode) {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = error.sql_err() {
        tracing::info!(
            error_code = ErrorCode::DatabaseUniqueViolation.code(),
            "Unique constraint violation: {}",
            detail
        );
        return (
            StatusCode::CONFLICT,
            ErrorCode::DatabaseUniqueViolation.default_message().to_string(),
            ErrorCode::DatabaseUniqueViolation,
        );
    }

    let (status, code) = match error {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            (StatusCode::NOT_FOUND, ErrorCode::NotFound)
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::DatabaseConnection)
        }
        DbErr::Query(_) | DbErr::Exec(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseQuery)
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseUnhandled),
    };

    if status.is_server_error() {
        tracing::error!(error_code = code.code(), "Database error: {:?}", error);
    } else {
        tracing::info!(error_code = code.code(), "Database error: {:?}", error);
    }

    (status, code.default_message().to_string(), code)
}

/// Build a JSON error response.
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::CONFLICT,
///     "The employee is already saved: ahincho@unsa.edu.pe".to_string(),
///     ErrorCode::Conflict,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
