//! Error types for the cache server
//!
//! The cache itself cannot fail; these errors cover the HTTP request layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::debug;

use crate::models::{DurationParseError, ErrorResponse};

// == Cache Error Enum ==
/// Error returned by request handlers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key was never set, was evicted, or has expired
    #[error("Key not found or expired")]
    NotFound(String),

    /// The `duration` parameter could not be parsed
    #[error("Invalid duration format")]
    InvalidDuration(#[from] DurationParseError),
}

impl CacheError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidDuration(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        match &self {
            CacheError::NotFound(key) => debug!(key = %key, "Cache miss"),
            CacheError::InvalidDuration(source) => debug!(error = %source, "Rejected set request"),
        }

        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(error: CacheError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            CacheError::NotFound("k".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CacheError::from(DurationParseError::Empty).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_body() {
        let (status, json) =
            tokio_test::block_on(body_json(CacheError::NotFound("missing".to_string())));

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Key not found or expired");
    }

    #[test]
    fn test_invalid_duration_body() {
        let error = CacheError::from(DurationParseError::MissingUnit("10".to_string()));
        let (status, json) = tokio_test::block_on(body_json(error));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid duration format");
    }
}
