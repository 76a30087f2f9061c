//! HTTP error responses
//!
//! Every failure is rendered as `{"message": "..."}` with a status code from
//! the request's failure class.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure returned to an HTTP client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed id, query parameter or body
    #[error("{0}")]
    BadRequest(String),

    /// No row for the requested id
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with current state (workshop full)
    #[error("{0}")]
    Conflict(String),

    /// Unexpected storage failure; the message is generic, the cause is logged
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code for this failure class
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a storage error, using `context` as the generic message for
    /// failures that are not the caller's fault.
    pub fn from_storage(err: toolshed_core::Error, context: &str) -> Self {
        use toolshed_core::Error;

        match err {
            Error::SoldOut { .. } => Self::Conflict("Workshop is fully booked".to_string()),
            Error::CapacityExceeded { total, .. } => Self::BadRequest(format!(
                "availableSpots must be between 0 and {total}"
            )),
            err if err.is_client_error() => Self::BadRequest(err.to_string()),
            err => {
                tracing::error!(error = %err, "{context}");
                Self::Internal(context.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
