//! Error types for the user service

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures raised by [`crate::service::UserService`]
#[derive(Error, Debug)]
pub enum UserServiceError {
    /// Client data violates a uniqueness or non-empty rule
    #[error("{0}")]
    Validation(String),

    /// The referenced user does not exist
    #[error("{0}")]
    NotFound(String),

    /// The password hasher failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The notifier could not deliver a message
    #[error("Notification failed: {0}")]
    Notification(#[source] anyhow::Error),

    /// Storage error
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Type alias for service results
pub type ServiceResult<T> = Result<T, UserServiceError>;

/// HTTP-facing error for the user service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found with message
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(msg) => ApiError::BadRequest(msg),
            UserServiceError::NotFound(msg) => ApiError::NotFound(msg),
            other => {
                error!(error = %other, "user service failure");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
