//! chatlog-server: chat turn persistence over HTTP
//!
//! Stores user/assistant turns keyed by `(user_id, session_id)` in Postgres
//! and returns them in chronological order.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{ChatHistoryRepo, Database, DbError};
pub use http::{run_server, ServerConfig};
