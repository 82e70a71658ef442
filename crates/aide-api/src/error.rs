//! API error types and JSON error response formatting.
//!
//! Every failing endpoint answers with `{error, message}` where `error` is a
//! machine-readable code and `message` is fit for display.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use aide_chat::ChatError;
use aide_core::AideError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "not_found").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    #[error("{0}")]
    BadRequest(String),
    /// 404 Not Found - resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// 409 Conflict - the session is in the wrong state for the request.
    #[error("{0}")]
    Conflict(String),
    /// 422 Unprocessable Entity - valid syntax but semantic validation failure.
    #[error("{0}")]
    UnprocessableEntity(String),
    /// 500 Internal Server Error - unexpected server error.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity", msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(%msg, "Internal API error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        let msg = err.to_string();
        match err {
            ChatError::EmptyMessage => ApiError::BadRequest(msg),
            ChatError::MessageTooLong(_) | ChatError::IncompletePersona => {
                ApiError::UnprocessableEntity(msg)
            }
            ChatError::SessionNotFound(_) => ApiError::NotFound(msg),
            ChatError::SetupIncomplete => ApiError::Conflict(msg),
            ChatError::StateLock(_) => ApiError::Internal(msg),
        }
    }
}

impl From<AideError> for ApiError {
    fn from(err: AideError) -> Self {
        match err {
            AideError::Config(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
