//! Request DTOs for the secret server API

use serde::Deserialize;

/// Request body for `POST /`
///
/// The ciphertext is produced by the browser; the server never looks
/// inside it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSecretRequest {
    #[serde(rename = "cipherText")]
    pub cipher_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"cipherText": "abc123"}"#;
        let req: CreateSecretRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cipher_text, "abc123");
    }

    #[test]
    fn test_create_request_missing_field() {
        let result = serde_json::from_str::<CreateSecretRequest>(r#"{"text": "abc"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cipherText"));
    }

    #[test]
    fn test_create_request_not_json() {
        assert!(serde_json::from_str::<CreateSecretRequest>("not-json").is_err());
    }
}
