//! Per-request context
//!
//! Carries the request deadline. Every suspension point (body read, cache
//! call) goes through [`RequestContext::run`] so it cannot outlive it.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    deadline: Instant,
}

impl RequestContext {
    /// Creates a context whose deadline is `timeout` from now.
    pub fn new(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    /// Runs `fut` to completion or fails with `DeadlineExceeded`.
    ///
    /// The future is dropped when the deadline passes, so whatever it was
    /// waiting on is cancelled with it.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout_at(self.deadline, fut)
            .await
            .map_err(|_| ApiError::DeadlineExceeded)?
    }
}
