//! Request and Response models for the secret server API
//!
//! DTOs for the JSON bodies exchanged with the browser client.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::CreateSecretRequest;
pub use responses::{CreateSecretResponse, ErrorResponse};
