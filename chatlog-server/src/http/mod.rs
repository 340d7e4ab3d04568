//! HTTP server layer
//!
//! Axum server with:
//! - `{code, msg, data}` envelope on every chat response
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::Envelope;
pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
