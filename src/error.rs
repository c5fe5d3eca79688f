//! Error types for the company data cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::fetch::FetchError;
use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend has no record for the requested descriptor
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend could not be reached or answered with an error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FetchError> for CacheError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(what) => CacheError::NotFound(what),
            FetchError::InvalidUrl(msg) => CacheError::Internal(msg),
            other => CacheError::Upstream(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
