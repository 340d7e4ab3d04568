//! Table bootstrap for chat history
//!
//! Creates the canonical `chat_history` table when it is missing. Existing
//! tables are never altered.

use super::{Database, DbError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS chat_history (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        conversation_id VARCHAR(64) NOT NULL,
        role VARCHAR(32) NOT NULL,
        content TEXT NOT NULL,
        entry_time TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
    )
"#;

const CREATE_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS chat_history_conversation_idx
        ON chat_history (user_id, conversation_id, entry_time)
"#;

/// Create the chat history table and its lookup index.
pub async fn ensure_schema(db: &Database) -> Result<(), DbError> {
    tracing::info!("Ensuring chat_history schema...");

    let mut conn = db.acquire().await?;
    sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
    sqlx::query(CREATE_INDEX).execute(&mut *conn).await?;

    Ok(())
}
