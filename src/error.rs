//! Error types for the secret server
//!
//! Every handler failure is turned into the same JSON envelope,
//! `{"message": "..."}`, with status 400.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Api Error Enum ==
/// Unified error type for the secret server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or unreadable client input
    #[error("{0}")]
    BadRequest(String),

    /// Secret never existed, was already read, or expired.
    ///
    /// The message is fixed so the three causes look the same to a caller.
    #[error("secret not found")]
    NotFound,

    /// Backing cache unreachable or returned a transport failure
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A suspension point outlived the request deadline
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// Failure on the server's own side (randomness, rendering, encoding)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<redis::RedisError> for ApiError {
    fn from(err: redis::RedisError) -> Self {
        ApiError::StorageUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorResponse::new(self.to_string());

        // An envelope that cannot be encoded is a bug, not a client error.
        let body = match serde_json::to_vec(&envelope) {
            Ok(body) => body,
            Err(err) => {
                error!("Failed to encode error envelope: {}", err);
                std::process::abort();
            }
        };

        (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the secret server.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_not_found_message_is_fixed() {
        assert_eq!(ApiError::NotFound.to_string(), "secret not found");
    }

    #[test]
    fn test_bad_request_is_verbatim() {
        let err = ApiError::BadRequest("expected value at line 1 column 1".to_string());
        assert_eq!(err.to_string(), "expected value at line 1 column 1");
    }

    #[tokio::test]
    async fn test_every_error_maps_to_400_envelope() {
        let errors = vec![
            ApiError::BadRequest("bad".to_string()),
            ApiError::NotFound,
            ApiError::StorageUnavailable("connection refused".to_string()),
            ApiError::DeadlineExceeded,
            ApiError::Internal("rng".to_string()),
        ];

        for err in errors {
            let expected = err.to_string();
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json"
            );

            let body: serde_json::Value =
                serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body, serde_json::json!({ "message": expected }));
        }
    }
}
