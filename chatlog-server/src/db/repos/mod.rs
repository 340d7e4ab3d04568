//! Repository implementations for database access

pub mod chat_history;

pub use chat_history::{ChatHistoryRepo, StoredTurn};
