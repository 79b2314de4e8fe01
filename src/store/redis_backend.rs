//! Redis Backend
//!
//! Talks to a Redis server through a multiplexed `ConnectionManager`. The
//! manager is cloned per call; it reconnects by itself after a dropped
//! connection but a failed command is reported to the caller as is.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::info;

use crate::error::Result;
use crate::store::CacheBackend;

#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Connects to the Redis server at `address` (`host:port`).
    pub async fn connect(address: &str) -> Result<Self> {
        let client = redis::Client::open(format!("redis://{}/", address))?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected to redis at {}", address);
        Ok(Self { conn })
    }
}

/// Redis rejects `PX 0`, so sub-millisecond lifetimes round up.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }

    // Needs Redis 6.2 or later.
    async fn get_and_delete(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GETDEL")
            .arg(key)
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }
}
