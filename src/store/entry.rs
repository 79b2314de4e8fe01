//! Stored Entry Module
//!
//! A ciphertext held by the in-memory backend together with its deadline.

use std::time::Duration;

use tokio::time::Instant;

// == Entry ==
/// A single stored value with its absolute expiry time.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored ciphertext
    pub value: String,
    /// Point after which the entry is gone
    pub expires_at: Instant,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`, so a
    /// secret with TTL `T` is unavailable at any time >= `T` after creation.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = Entry::new("cipher".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "cipher");
        assert_eq!(entry.expires_at, Instant::now() + Duration::from_secs(60));
        assert!(!entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = Entry::new("cipher".to_string(), Duration::from_secs(1));
        assert!(!entry.is_expired());

        tokio::time::advance(Duration::from_millis(1100)).await;

        assert!(entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiration_boundary_condition() {
        let entry = Entry::new("cipher".to_string(), Duration::from_secs(5));

        // Expired exactly at the deadline, not one tick later
        assert!(!entry.is_expired_at(entry.expires_at - Duration::from_nanos(1)));
        assert!(entry.is_expired_at(entry.expires_at));
    }
}
