//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One explicitly constructed pool, injected into handlers via state
//! - Each operation acquires its own connection and drops it on every path
//! - Bounded acquire wait and server-side statement timeout
//! - Errors are classified once, at the sqlx boundary

pub mod error;
pub mod pool;
pub mod repos;
pub mod schema;

pub use error::DbError;
pub use pool::Database;
pub use repos::*;
pub use schema::ensure_schema;
