//! Chat turn as returned to clients

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One turn of a conversation, in the wire shape `{role, content}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatEntry {
    pub role: String,
    pub content: String,
}

impl ChatEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}
