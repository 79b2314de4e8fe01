//! burnlink - burn-after-reading secret sharing
//!
//! Stores client-encrypted ciphertexts in an expiring cache and hands each
//! one out at most once.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use context::RequestContext;
pub use error::{ApiError, Result};
pub use store::SecretStore;
pub use tasks::spawn_cleanup_task;
