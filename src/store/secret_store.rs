//! Secret Store Module
//!
//! Create-once, read-once, expire-automatically semantics on top of a
//! [`CacheBackend`].

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::context::RequestContext;
use crate::error::{ApiError, Result};
use crate::store::CacheBackend;

/// Default secret lifetime: 72 hours
pub const DEFAULT_TTL: Duration = Duration::from_secs(72 * 60 * 60);

// == Secret Store ==
/// Owner of the secret lifecycle. Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SecretStore {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl SecretStore {
    // == Constructor ==
    /// Creates a store writing every secret with the given lifetime.
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    // == Put ==
    /// Stores `ciphertext` under `id`, overwriting any live secret with the
    /// same id.
    pub async fn put(&self, ctx: &RequestContext, id: &str, ciphertext: &str) -> Result<()> {
        ctx.run(self.backend.set_with_expiry(id, ciphertext, self.ttl))
            .await?;
        debug!("Stored secret for {:?}", self.ttl);
        Ok(())
    }

    // == Get ==
    /// Returns the ciphertext for `id` without consuming it.
    ///
    /// Never-created, already-read and expired ids all fail with the same
    /// `NotFound`.
    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<String> {
        ctx.run(self.backend.get(id))
            .await?
            .ok_or(ApiError::NotFound)
    }

    // == Delete ==
    /// Removes `id`. Deleting an absent id is not an error.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        ctx.run(self.backend.delete(id)).await
    }

    // == Take ==
    /// Returns the ciphertext for `id` and removes it atomically.
    ///
    /// Of any number of concurrent `take`s for one id, at most one succeeds.
    pub async fn take(&self, ctx: &RequestContext, id: &str) -> Result<String> {
        ctx.run(self.backend.get_and_delete(id))
            .await?
            .ok_or(ApiError::NotFound)
    }
}
