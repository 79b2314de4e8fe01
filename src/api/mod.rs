//! API Module
//!
//! The method-dispatch router, the handlers it hosts and the route table.
//!
//! # Endpoints
//! - `POST /` - Store a ciphertext
//! - `GET /l/{id}` - Read a secret once
//! - `GET /` - Static files

pub mod handlers;
mod page;
pub mod router;
pub mod routes;

pub use handlers::AppState;
pub use router::{Reply, Router};
pub use routes::create_router;
