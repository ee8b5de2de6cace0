use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `UNAUTHORIZED`, `ACCESS_DENIED`,
    /// `VALIDATION_ERROR`, `INVALID_NAME`, `INVALID_ARGUMENTS`, `NOT_FOUND`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Missing required field 'oldPath'")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid gateway trust signal or identity headers.
    Unauthorized(String),
    /// A path resolved outside the caller's tenant namespace.
    AccessDenied,
    /// Malformed request body or query.
    Validation(String),
    /// A rename target or resolved path is not a legal name.
    InvalidName(String),
    /// A tool call is missing required arguments.
    InvalidArguments(String),
    NotFound(String),
    /// Backing store or upstream fetch failure. Detail is logged, not leaked.
    Upstream(String),
    Internal(String),
}

impl AppError {
    /// Client-visible code and message for this error.
    ///
    /// Upstream and internal detail is collapsed to a generic message here;
    /// the detail only reaches the server log.
    pub fn parts(&self) -> (&'static str, String) {
        match self {
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            AppError::AccessDenied => (
                "ACCESS_DENIED",
                "Path is outside your tenant namespace".into(),
            ),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::InvalidName(msg) => ("INVALID_NAME", msg.clone()),
            AppError::InvalidArguments(msg) => ("INVALID_ARGUMENTS", msg.clone()),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::Upstream(_) | AppError::Internal(_) => {
                ("INTERNAL_ERROR", "An unexpected error occurred".into())
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::Validation(_) | AppError::InvalidName(_) | AppError::InvalidArguments(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(detail) => tracing::error!("Upstream failure: {}", detail),
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            _ => {}
        }
        let status = self.status();
        let (code, message) = self.parts();
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("No file at '{key}'")),
            StorageError::InvalidKey(msg) => AppError::InvalidName(msg),
            StorageError::SizeLimitExceeded { actual, limit } => AppError::Validation(format!(
                "Content exceeds maximum size of {limit} bytes (got {actual})"
            )),
            StorageError::Backend(detail) => AppError::Upstream(detail),
        }
    }
}
