//! Cache Backend Module
//!
//! The seam between the secret store and the networked cache. A backend only
//! has to offer expiring writes, reads, deletes and an atomic read-and-remove.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Key-value primitives the secret store needs from its cache.
///
/// Implementations are shared by every in-flight request and must be safe
/// for concurrent use on their own; callers add no locking.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value, and arranges
    /// for it to disappear after `ttl`.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Returns the live value for `key` and removes it in one atomic step.
    async fn get_and_delete(&self, key: &str) -> Result<Option<String>>;
}
