//! API Routes
//!
//! Builds the route table and hands it to axum.
//!
//! # Endpoints
//! - `POST /` - Store a ciphertext, returns its id
//! - `GET /l/{id}` - Show a secret once, then it is gone
//! - `GET /` and any other path - Static files

use std::future::Future;

use axum::{extract::Request, http::Method};
use tower_http::trace::TraceLayer;

use super::handlers::{create_secret, serve_static, show_secret, AppState, LINK_PREFIX};
use super::router::{Reply, Router};
use crate::context::RequestContext;
use crate::error::Result;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Tracing: request spans via tower-http
pub fn create_router(state: AppState) -> axum::Router {
    let mut router = Router::new(state.request_timeout);

    router
        .register(Method::GET, "/", with_state(&state, serve_static))
        .register(Method::POST, "/", with_state(&state, create_secret))
        .register(Method::GET, LINK_PREFIX, with_state(&state, show_secret));

    router
        .into_service()
        .layer(TraceLayer::new_for_http())
}

/// Binds a handler to a clone of the shared state.
fn with_state<H, Fut>(
    state: &AppState,
    handler: H,
) -> impl Fn(RequestContext, Request) -> Fut + Send + Sync + 'static
where
    H: Fn(AppState, RequestContext, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Reply>> + Send + 'static,
{
    let state = state.clone();
    move |ctx: RequestContext, request: Request| handler(state.clone(), ctx, request)
}
