//! burnlink server entry point
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Parse configuration from flags and environment
//! 3. Connect the storage backend
//! 4. Build the router and serve until SIGINT/SIGTERM

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use burnlink::config::BackendKind;
use burnlink::store::{CacheBackend, MemoryBackend, RedisBackend};
use burnlink::{create_router, spawn_cleanup_task, AppState, Config, SecretStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burnlink=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, read_mode={:?}, ttl={}s, port={}",
        config.backend, config.read_mode, config.secret_ttl, config.port
    );

    let (backend, cleanup_handle) = connect_backend(&config).await?;
    let store = SecretStore::new(backend, config.secret_ttl());
    let app = create_router(AppState::from_config(store, &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Returns once the listener is closed and in-flight requests drained;
    // any other listener failure is fatal.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
        info!("Expiry sweep stopped");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured backend. The memory backend also gets its expiry
/// sweep, whose handle is returned so shutdown can stop it.
async fn connect_backend(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CacheBackend>, Option<JoinHandle<()>>)> {
    match config.backend {
        BackendKind::Redis => {
            let backend = RedisBackend::connect(&config.redis_address)
                .await
                .with_context(|| format!("failed to connect to redis at {}", config.redis_address))?;
            let backend: Arc<dyn CacheBackend> = Arc::new(backend);
            Ok((backend, None))
        }
        BackendKind::Memory => {
            warn!("Using in-memory storage, secrets are lost on restart");
            let backend = MemoryBackend::new();
            let handle = spawn_cleanup_task(backend.clone(), config.cleanup_interval);
            let backend: Arc<dyn CacheBackend> = Arc::new(backend);
            Ok((backend, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
