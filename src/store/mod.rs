//! Store Module
//!
//! Ephemeral secret storage: the [`SecretStore`] lifecycle on top of a
//! pluggable [`CacheBackend`] (Redis or in-memory).

mod backend;
mod entry;
mod id;
mod memory;
mod redis_backend;
mod secret_store;


// Re-export public types
pub use backend::CacheBackend;
pub use entry::Entry;
pub use id::{generate_id, ID_BYTES, ID_LENGTH};
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
pub use secret_store::{SecretStore, DEFAULT_TTL};
