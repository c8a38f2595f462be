use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Another employee already uses this email
    #[error("The employee is already saved: {0}")]
    DuplicateEmail(String),

    #[error("Employee not found: {0}")]
    NotFound(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EmployeeResult<T> = Result<T, EmployeeError>;

impl From<EmployeeError> for AppError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            EmployeeError::NotFound(id) => AppError::NotFound(format!("Employee {} not found", id)),
            EmployeeError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
