//! Response DTOs for the secret server API

use serde::Serialize;

/// Response body for `POST /`
#[derive(Debug, Clone, Serialize)]
pub struct CreateSecretResponse {
    /// Identifier to put in the share link
    pub id: String,
}

impl CreateSecretResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Error envelope for every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
