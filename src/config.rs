//! Configuration Module
//!
//! Server settings, read from command-line flags with environment variable
//! fallbacks. Parsed once at startup and handed to every component.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

// == Defaults ==
// Shared by the flag definitions and `Config::default`.
pub const DEFAULT_REDIS_ADDRESS: &str = "localhost:6379";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SECRET_TTL_SECS: u64 = 72 * 60 * 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
pub const DEFAULT_STATIC_DIR: &str = ".";
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Which cache implementation backs the secret store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Networked Redis server
    Redis,
    /// In-process map, lost on restart
    Memory,
}

/// How a read consumes a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReadMode {
    /// Single atomic get-and-delete. Only one concurrent reader can win.
    Atomic,
    /// Get, render, then delete. A failed delete leaves the secret in place
    /// until it expires.
    TwoPhase,
}

/// Server configuration parameters.
#[derive(Debug, Clone, Parser)]
#[command(name = "burnlink", version, about)]
pub struct Config {
    /// Redis address in format host:port
    #[arg(long, env = "REDIS_ADDRESS", default_value = DEFAULT_REDIS_ADDRESS)]
    pub redis_address: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Storage backend
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = BackendKind::Redis)]
    pub backend: BackendKind,

    /// Read semantics for secret retrieval
    #[arg(long, env = "READ_MODE", value_enum, default_value_t = ReadMode::Atomic)]
    pub read_mode: ReadMode,

    /// Secret lifetime in seconds
    #[arg(long, env = "SECRET_TTL", default_value_t = DEFAULT_SECRET_TTL_SECS)]
    pub secret_ttl: u64,

    /// Per-request deadline in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Directory served for GET requests outside /l/
    #[arg(long, env = "STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    /// Expiry sweep interval in seconds (memory backend only)
    #[arg(long, env = "CLEANUP_INTERVAL", default_value_t = DEFAULT_CLEANUP_INTERVAL_SECS)]
    pub cleanup_interval: u64,
}

impl Config {
    /// Parses flags from the process arguments, falling back to environment
    /// variables and then to defaults.
    pub fn from_env() -> Self {
        Self::parse()
    }

    pub fn secret_ttl(&self) -> Duration {
        Duration::from_secs(self.secret_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_address: DEFAULT_REDIS_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            backend: BackendKind::Redis,
            read_mode: ReadMode::Atomic,
            secret_ttl: DEFAULT_SECRET_TTL_SECS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.redis_address, "localhost:6379");
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.read_mode, ReadMode::Atomic);
        assert_eq!(config.secret_ttl(), Duration::from_secs(259_200));
        assert_eq!(config.static_dir, PathBuf::from("."));
    }

    #[test]
    fn test_config_default_matches_flag_defaults() {
        for var in [
            "REDIS_ADDRESS",
            "PORT",
            "STORE_BACKEND",
            "READ_MODE",
            "SECRET_TTL",
            "REQUEST_TIMEOUT",
            "MAX_BODY_BYTES",
            "STATIC_DIR",
            "CLEANUP_INTERVAL",
        ] {
            std::env::remove_var(var);
        }

        let parsed = Config::try_parse_from(["burnlink"]).unwrap();
        let default = Config::default();

        assert_eq!(parsed.redis_address, default.redis_address);
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.backend, default.backend);
        assert_eq!(parsed.read_mode, default.read_mode);
        assert_eq!(parsed.secret_ttl, default.secret_ttl);
        assert_eq!(parsed.request_timeout, default.request_timeout);
        assert_eq!(parsed.max_body_bytes, default.max_body_bytes);
        assert_eq!(parsed.static_dir, default.static_dir);
        assert_eq!(parsed.cleanup_interval, default.cleanup_interval);
    }

    #[test]
    fn test_config_flags() {
        let config = Config::try_parse_from([
            "burnlink",
            "--redis-address",
            "cache:6380",
            "--port",
            "9000",
            "--backend",
            "memory",
            "--read-mode",
            "two-phase",
            "--secret-ttl",
            "60",
        ])
        .unwrap();

        assert_eq!(config.redis_address, "cache:6380");
        assert_eq!(config.port, 9000);
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.read_mode, ReadMode::TwoPhase);
        assert_eq!(config.secret_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_rejects_unknown_backend() {
        let result = Config::try_parse_from(["burnlink", "--backend", "postgres"]);
        assert!(result.is_err());
    }
}
