//! Database connection pool management
//!
//! Wraps sqlx `PgPool` with an explicit lifecycle: `connect` at startup,
//! `acquire` per operation, `close` at shutdown.

use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use super::DbError;
use crate::config::DatabaseConfig;

/// Pool manager handed to the store and the HTTP state.
///
/// Cloning is cheap and shares the same underlying pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create the pool and verify the server is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the first connection cannot be established
    /// (unreachable host, bad credentials, unknown database).
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let pool = pool_options(config)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                tracing::error!(
                    host = %config.host,
                    port = config.port,
                    database = %config.database,
                    error = %e,
                    "failed to create database pool"
                );
                DbError::from(e)
            })?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    /// Create the pool without opening any connection.
    ///
    /// The first `acquire` dials the server.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = pool_options(config).connect_lazy_with(config.connect_options());
        Self { pool }
    }

    /// Acquire an exclusive connection.
    ///
    /// The connection goes back to the pool when the handle is dropped, so
    /// early returns and `?` release it too. Waits at most the configured
    /// acquire timeout.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, DbError> {
        self.pool.acquire().await.map_err(DbError::from)
    }

    /// Close all connections, waiting for checked-out ones to come back.
    ///
    /// Safe to call more than once.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        tracing::info!(in_use = self.in_use(), "closing database pool");
        self.pool.close().await;
        tracing::info!("database pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Open connections, idle or checked out.
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    pub fn idle(&self) -> usize {
        self.pool.num_idle()
    }

    fn in_use(&self) -> usize {
        (self.size() as usize).saturating_sub(self.idle())
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    /// Config pointing at a port nothing listens on.
    pub(crate) fn unreachable_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 1,
            user: "chatlog".into(),
            password: String::new(),
            database: "chatlog".into(),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(1),
            statement_timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn lazy_pool_opens_nothing() {
        let db = Database::connect_lazy(&unreachable_config());
        assert_eq!(db.size(), 0);
        assert!(!db.is_closed());
    }

    #[tokio::test]
    async fn unreachable_server_fails_acquire() {
        let db = Database::connect_lazy(&unreachable_config());
        let err = db.acquire().await.unwrap_err();
        assert!(matches!(err, DbError::Connection(_) | DbError::Timeout));
    }

    #[tokio::test]
    async fn connect_fails_fast_on_unreachable_server() {
        let err = Database::connect(&unreachable_config()).await.unwrap_err();
        assert!(matches!(err, DbError::Connection(_) | DbError::Timeout));
    }

    #[tokio::test]
    async fn close_is_idempotent_and_rejects_acquire() {
        let db = Database::connect_lazy(&unreachable_config());
        db.close().await;
        db.close().await;

        assert!(db.is_closed());
        let err = db.acquire().await.unwrap_err();
        assert!(matches!(err, DbError::PoolClosed));
    }

    #[tokio::test]
    async fn clones_share_lifecycle() {
        let db = Database::connect_lazy(&unreachable_config());
        let handle = db.clone();
        db.close().await;
        assert!(handle.is_closed());
    }

    // Integration tests require a real database
    // Run with: CHATLOG_DB_HOST=... cargo test -p chatlog-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let config = DatabaseConfig::from_env().expect("CHATLOG_DB_* required");
        let db = Database::connect(&config).await.expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let mut conn = db.acquire().await.expect("acquire failed");
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&mut *conn)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }

        assert!(db.size() <= config.max_connections);
        db.close().await;
    }
}
