//! Error types for the cache and the city directory service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors produced by the query cache itself.
///
/// The cache is always safe to bypass: every variant surfaces at the call
/// site instead of silently caching a broken entry. A fetch failure is never
/// a cache error; it propagates unchanged through the cached-query wrapper.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Query parameters could not be serialized into a cache key
    #[error("Failed to derive cache key: {0}")]
    KeyDerivation(#[source] serde_json::Error),

    /// Invalidation pattern is not a valid regular expression
    #[error("Invalid invalidation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

// == App Error Enum ==
/// Unified error type for the city directory service.
#[derive(Error, Debug)]
pub enum AppError {
    /// City not found in the repository
    #[error("City not found: {0}")]
    CityNotFound(u64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache-level failure
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::CityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Cache(CacheError::InvalidPattern(_)) => StatusCode::BAD_REQUEST,
            AppError::Cache(CacheError::KeyDerivation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service layer.
pub type Result<T> = std::result::Result<T, AppError>;
