//! Error codes carried in every error body.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// Path identifier is not a valid integer
    InvalidId,

    /// Body could not be parsed into the expected JSON shape
    JsonExtraction,

    NotFound,

    /// Request conflicts with stored state (e.g. duplicate email)
    Conflict,

    // Server errors
    InternalError,

    ServiceUnavailable,

    // Database errors (2000s)
    /// Connection could not be acquired from the pool
    DatabaseConnection,

    /// Query or statement failed
    DatabaseQuery,

    /// A stored row violates a unique constraint
    DatabaseUniqueViolation,

    DatabaseUnhandled,

    // I/O errors (4000s)
    IoError,
}

impl ErrorCode {
    /// Machine-readable identifier sent to clients
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabaseQuery => "DATABASE_QUERY",
            Self::DatabaseUniqueViolation => "DATABASE_UNIQUE_VIOLATION",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
            Self::IoError => "IO_ERROR",
        }
    }

    /// Integer code for logs and dashboards
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Conflict => 1008,
            Self::InternalError => 1500,
            Self::ServiceUnavailable => 1503,
            Self::DatabaseConnection => 2001,
            Self::DatabaseQuery => 2002,
            Self::DatabaseUniqueViolation => 2003,
            Self::DatabaseUnhandled => 2099,
            Self::IoError => 4001,
        }
    }

    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidId => "Invalid identifier format",
            Self::JsonExtraction => "Invalid JSON request body",
            Self::NotFound => "The requested resource was not found",
            Self::Conflict => "Resource already exists",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseConnection => "Database connection unavailable",
            Self::DatabaseQuery => "A database error occurred",
            Self::DatabaseUniqueViolation => "Resource already exists",
            Self::DatabaseUnhandled => "Internal database error",
            Self::IoError => "An I/O error occurred",
        }
    }

    pub const fn is_client_error(&self) -> bool {
        self.code() < 2000
            && !matches!(self, Self::InternalError | Self::ServiceUnavailable)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
