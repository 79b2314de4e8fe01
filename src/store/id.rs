//! Secret identifier generation
//!
//! The id is also the access token for a secret, so it comes from the
//! operating system's CSPRNG and never from a seeded generator.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{ApiError, Result};

/// Bytes of randomness in an id
pub const ID_BYTES: usize = 8;

/// Length of the hex-encoded id
pub const ID_LENGTH: usize = ID_BYTES * 2;

/// Generates a fresh identifier: 8 random bytes as 16 lowercase hex chars.
pub fn generate_id() -> Result<String> {
    let mut bytes = [0u8; ID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ApiError::Internal(format!("random source failed: {}", e)))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = generate_id().unwrap();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id().unwrap()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
