//! Chat history repository
//!
//! Two operations over the `chat_history` table:
//! - insert_turn: one INSERT inside an explicit transaction
//! - fetch_history: whole conversation, oldest first
//!
//! Both acquire their own connection; the handle is dropped (and returned to
//! the pool) on every exit path.

use chrono::{DateTime, Utc};
use sqlx::{Connection, FromRow};

use crate::db::{Database, DbError};
use crate::models::{ChatEntry, SessionId};

/// Identity of a freshly inserted row
#[derive(Debug, Clone, FromRow)]
pub struct StoredTurn {
    pub id: i64,
    pub entry_time: DateTime<Utc>,
}

/// Chat history repository
pub struct ChatHistoryRepo<'a> {
    db: &'a Database,
}

impl<'a> ChatHistoryRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist one turn.
    ///
    /// Commits on success. On failure the transaction is rolled back, so no
    /// partial row survives, and the classified error is logged and returned.
    pub async fn insert_turn(
        &self,
        user_id: i64,
        conversation_id: &SessionId,
        role: &str,
        content: &str,
    ) -> Result<StoredTurn, DbError> {
        match self
            .insert_in_tx(user_id, conversation_id, role, content)
            .await
        {
            Ok(stored) => {
                tracing::debug!(
                    user_id,
                    conversation_id = %conversation_id,
                    id = stored.id,
                    "chat turn stored"
                );
                Ok(stored)
            }
            Err(e) => {
                tracing::error!(
                    user_id,
                    conversation_id = %conversation_id,
                    kind = e.kind(),
                    error = %e,
                    "failed to insert chat turn"
                );
                Err(e)
            }
        }
    }

    async fn insert_in_tx(
        &self,
        user_id: i64,
        conversation_id: &SessionId,
        role: &str,
        content: &str,
    ) -> Result<StoredTurn, DbError> {
        let mut conn = self.db.acquire().await?;
        let mut tx = conn.begin().await?;

        let inserted = sqlx::query_as::<_, StoredTurn>(
            r#"
            INSERT INTO chat_history (user_id, conversation_id, role, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, entry_time
            "#,
        )
        .bind(user_id)
        .bind(conversation_id.as_str())
        .bind(role)
        .bind(content)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(stored) => {
                tx.commit().await?;
                Ok(stored)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback after failed insert also failed");
                }
                Err(e.into())
            }
        }
    }

    /// All turns of one conversation, ordered by entry time.
    ///
    /// An empty vector means the conversation has no turns yet; a failed
    /// query is an `Err`. The two are logged differently.
    pub async fn fetch_history(
        &self,
        user_id: i64,
        conversation_id: &SessionId,
    ) -> Result<Vec<ChatEntry>, DbError> {
        let result = self.select_history(user_id, conversation_id).await;

        match &result {
            Ok(entries) if entries.is_empty() => {
                tracing::info!(
                    user_id,
                    conversation_id = %conversation_id,
                    "no chat history"
                );
            }
            Ok(entries) => {
                tracing::debug!(
                    user_id,
                    conversation_id = %conversation_id,
                    turns = entries.len(),
                    "chat history fetched"
                );
            }
            Err(e) => {
                tracing::error!(
                    user_id,
                    conversation_id = %conversation_id,
                    kind = e.kind(),
                    error = %e,
                    "failed to fetch chat history"
                );
            }
        }

        result
    }

    async fn select_history(
        &self,
        user_id: i64,
        conversation_id: &SessionId,
    ) -> Result<Vec<ChatEntry>, DbError> {
        let mut conn = self.db.acquire().await?;

        // id breaks ties between rows sharing a timestamp
        let entries = sqlx::query_as::<_, ChatEntry>(
            r#"
            SELECT role, content
            FROM chat_history
            WHERE user_id = $1 AND conversation_id = $2
            ORDER BY entry_time ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(conversation_id.as_str())
        .fetch_all(&mut *conn)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::tests::unreachable_config;

    #[tokio::test]
    async fn insert_reports_connection_failure() {
        let db = Database::connect_lazy(&unreachable_config());
        let session = SessionId::new("s").unwrap();

        let err = ChatHistoryRepo::new(&db)
            .insert_turn(1, &session, "user", "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Connection(_) | DbError::Timeout));
    }

    #[tokio::test]
    async fn fetch_on_closed_pool_is_an_error_not_empty() {
        let db = Database::connect_lazy(&unreachable_config());
        db.close().await;
        let session = SessionId::new("s").unwrap();

        let result = ChatHistoryRepo::new(&db).fetch_history(1, &session).await;
        assert!(matches!(result, Err(DbError::PoolClosed)));
    }
}
