//! API Handlers
//!
//! Handlers hosted by the [`Router`](super::Router). Each takes the shared
//! state, the request context and the raw request.

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    body::Body,
    extract::Request,
    http::header,
    response::{Html, IntoResponse},
};
use tower::util::ServiceExt;
use tower_http::services::ServeDir;
use tracing::warn;

use crate::api::page::render_page;
use crate::api::router::Reply;
use crate::config::{Config, ReadMode};
use crate::context::RequestContext;
use crate::error::{ApiError, Result};
use crate::models::{CreateSecretRequest, CreateSecretResponse};
use crate::store::{generate_id, SecretStore};

/// Path prefix of share links
pub const LINK_PREFIX: &str = "/l/";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Secret lifecycle owner
    pub store: SecretStore,
    /// How `GET /l/{id}` consumes a secret
    pub read_mode: ReadMode,
    /// Root for static files
    pub static_dir: PathBuf,
    /// Upper bound on a POST body
    pub max_body_bytes: usize,
    /// Deadline handed to every request
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates state with default settings around the given store.
    pub fn new(store: SecretStore) -> Self {
        Self::from_config(store, &Config::default())
    }

    pub fn from_config(store: SecretStore, config: &Config) -> Self {
        Self {
            store,
            read_mode: config.read_mode,
            static_dir: config.static_dir.clone(),
            max_body_bytes: config.max_body_bytes,
            request_timeout: config.request_timeout(),
        }
    }
}

/// Handler for POST /
///
/// Stores the posted ciphertext under a fresh random id and returns the id.
pub async fn create_secret(
    state: AppState,
    ctx: RequestContext,
    request: Request,
) -> Result<Reply> {
    let body = ctx
        .run(async {
            axum::body::to_bytes(request.into_body(), state.max_body_bytes)
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))
        })
        .await?;

    let req: CreateSecretRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let id = generate_id()?;
    state.store.put(&ctx, &id, &req.cipher_text).await?;

    Reply::json(&CreateSecretResponse::new(id))
}

/// Handler for GET /l/{id}
///
/// Renders the display page for a secret and consumes it. In two-phase mode
/// the delete runs after rendering and a failed delete does not fail the
/// request; the secret then lives on until it expires.
pub async fn show_secret(state: AppState, ctx: RequestContext, request: Request) -> Result<Reply> {
    let path = request.uri().path().to_string();
    let id = secret_id(&path).ok_or(ApiError::NotFound)?;

    let page = match state.read_mode {
        ReadMode::Atomic => {
            let cipher_text = state.store.take(&ctx, id).await?;
            render_taken(&cipher_text, render_page)?
        }
        ReadMode::TwoPhase => {
            let cipher_text = state.store.get(&ctx, id).await?;
            let page = render_page(&cipher_text)?;
            if let Err(err) = state.store.delete(&ctx, id).await {
                warn!("Secret served but not deleted, it stays until expiry: {}", err);
            }
            page
        }
    };

    Ok(Reply::Response(
        ([(header::CACHE_CONTROL, "no-store")], Html(page)).into_response(),
    ))
}

/// Renders a secret that has already been removed from the store.
///
/// A render failure here loses the secret for good, so it is logged before
/// the error goes back to the caller.
fn render_taken<F>(cipher_text: &str, render: F) -> Result<String>
where
    F: FnOnce(&str) -> Result<String>,
{
    render(cipher_text).inspect_err(|err| {
        warn!("Secret consumed but page could not be rendered: {}", err);
    })
}

/// Handler for GET / and everything below it that no other route claims
///
/// Serves files from the static directory. Paths are normalized and anything
/// escaping the root is rejected; missing files get 404.
pub async fn serve_static(
    state: AppState,
    _ctx: RequestContext,
    request: Request,
) -> Result<Reply> {
    let response = match ServeDir::new(&state.static_dir).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(Reply::Response(response.map(Body::new)))
}

/// Extracts the id from `/l/{id}` or `/l/{id}/{key}`.
///
/// Anything after the id is the browser's decryption key and never used by
/// the server.
fn secret_id(path: &str) -> Option<&str> {
    path.strip_prefix(LINK_PREFIX)?
        .split('/')
        .next()
        .filter(|id| !id.is_empty())
}
