//! Method Dispatch Router
//!
//! Maps `(path, method)` pairs to handlers and enforces one response
//! contract for all of them:
//! - `Ok(Reply::Empty)` -> 200 with an empty body
//! - `Ok(Reply::Json(_))` -> 200 with the JSON body
//! - `Ok(Reply::Response(_))` -> the handler's own response, untouched
//! - `Err(_)` -> 400 with `{"message": "..."}`
//!
//! A path with no entry gets 404; a known path without a handler for the
//! request method gets 405. Both have empty bodies.
//!
//! Paths match exactly, except that a path ending in `/` is a subtree entry
//! covering every path below it. Exact entries beat subtrees and the longest
//! subtree wins.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::context::RequestContext;
use crate::error::{ApiError, Result};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Reply>> + Send>>;

type Handler = Arc<dyn Fn(RequestContext, Request) -> HandlerFuture + Send + Sync>;

// == Reply ==
/// Successful handler result.
pub enum Reply {
    /// Nothing to send: 200 with an empty body
    Empty,
    /// Serialized and sent with status 200
    Json(serde_json::Value),
    /// Sent as built by the handler (static files, HTML pages)
    Response(Response),
}

impl Reply {
    /// Converts any serializable value into a JSON reply.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Reply::Json)
            .map_err(|e| ApiError::Internal(format!("failed to encode response: {}", e)))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Empty => StatusCode::OK.into_response(),
            Reply::Json(value) => match serde_json::to_vec(&value) {
                Ok(body) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response(),
                Err(e) => {
                    ApiError::Internal(format!("failed to encode response: {}", e)).into_response()
                }
            },
            Reply::Response(response) => response,
        }
    }
}

// == Router ==
/// Route table in its configuration phase.
///
/// Register everything, then call [`Router::into_service`]; that consumes the
/// table, so no route can change once requests are being served.
pub struct Router {
    routes: HashMap<String, HashMap<Method, Handler>>,
    request_timeout: Duration,
}

impl Router {
    /// Creates an empty router. Each request gets a deadline of
    /// `request_timeout` from the moment it is dispatched.
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            routes: HashMap::new(),
            request_timeout,
        }
    }

    // == Register ==
    /// Associates `handler` with `(method, path)`.
    ///
    /// Registering the same pair again replaces the earlier handler.
    pub fn register<F, Fut>(&mut self, method: Method, path: &str, handler: F) -> &mut Self
    where
        F: Fn(RequestContext, Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Reply>> + Send + 'static,
    {
        let handler: Handler =
            Arc::new(move |ctx: RequestContext, request: Request| -> HandlerFuture {
                Box::pin(handler(ctx, request))
            });
        if self
            .routes
            .entry(path.to_string())
            .or_default()
            .insert(method.clone(), handler)
            .is_some()
        {
            debug!("Replaced handler for {} {}", method, path);
        }
        self
    }

    fn lookup(&self, path: &str) -> Option<&HashMap<Method, Handler>> {
        if let Some(methods) = self.routes.get(path) {
            return Some(methods);
        }

        self.routes
            .iter()
            .filter(|(pattern, _)| pattern.ends_with('/') && path.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, methods)| methods)
    }

    // == Dispatch ==
    /// Runs the handler registered for the request's path and method and
    /// turns its result into a response.
    pub async fn dispatch(&self, request: Request) -> Response {
        let path = request.uri().path().to_string();

        let Some(methods) = self.lookup(&path) else {
            debug!("No route for {}", path);
            return StatusCode::NOT_FOUND.into_response();
        };

        let Some(handler) = methods.get(request.method()) else {
            debug!("Method {} not allowed for {}", request.method(), path);
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        };

        info!("{} {}", request.method(), path);

        let ctx = RequestContext::new(self.request_timeout);
        match handler(ctx, request).await {
            Ok(reply) => reply.into_response(),
            Err(err) => {
                match &err {
                    ApiError::StorageUnavailable(_) | ApiError::Internal(_) => {
                        warn!("Request to {} failed: {}", path, err)
                    }
                    _ => debug!("Request to {} rejected: {}", path, err),
                }
                err.into_response()
            }
        }
    }

    // == Into Service ==
    /// Ends the configuration phase and returns an axum router that sends
    /// every request through [`Router::dispatch`].
    pub fn into_service(self) -> axum::Router {
        let router = Arc::new(self);
        axum::Router::new().fallback(move |request: Request| {
            let router = Arc::clone(&router);
            async move { router.dispatch(request).await }
        })
    }
}
