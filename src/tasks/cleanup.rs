//! Expiry Sweep Task
//!
//! Background task that periodically drops expired entries from the
//! in-memory backend. Reads never see an expired entry either way; the sweep
//! only reclaims memory for secrets nobody read.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryBackend;

/// Spawns a background task that removes expired entries every
/// `cleanup_interval_secs` seconds.
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(backend: MemoryBackend, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.cleanup_expired().await;
            if removed > 0 {
                info!("Expiry sweep: removed {} expired secrets", removed);
            } else {
                debug!("Expiry sweep: nothing to remove");
            }
        }
    })
}
