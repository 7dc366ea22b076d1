/// Error handling for the API server
///
/// One unified error type mapping onto the HTTP surface. Handlers return
/// `ApiResult<T>`; conversions from the store and auth layers keep the
/// `?` operator working end to end.
///
/// # Taxonomy
///
/// | Variant      | Status | Meaning                                   |
/// |--------------|--------|-------------------------------------------|
/// | `Validation` | 400    | Malformed or missing input                |
/// | `Auth`       | 401    | Bad credentials, invalid or stale tokens  |
/// | `NotFound`   | 404    | Missing resource, or not owned by caller  |
/// | `Conflict`   | 409    | Uniqueness violation                      |
/// | `Internal`   | 500    | Unexpected failure (logged, not leaked)   |
///
/// No retries happen anywhere in the core; every operation either fully
/// succeeds or fully fails.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use corkboard_shared::auth::jwt::JwtError;
use corkboard_shared::auth::middleware::BearerError;
use corkboard_shared::auth::password::PasswordError;
use corkboard_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Authentication failure (401)
    #[error("Unauthorized: {0}")]
    Auth(String),

    /// Missing resource or not owned by caller (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unexpected failure (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "validation_error", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Database(msg) => ApiError::Internal(format!("Database error: {}", msg)),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Auth("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Auth("Invalid token issuer".to_string()),
            JwtError::CreateError(msg) => {
                ApiError::Internal(format!("Token creation failed: {}", msg))
            }
            other => ApiError::Auth(format!("Invalid token: {}", other)),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<BearerError> for ApiError {
    fn from(err: BearerError) -> Self {
        ApiError::Auth(err.to_string())
    }
}
