//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub pool: PoolStatus,
}

/// Pool occupancy at the time of the check
#[derive(Serialize)]
pub struct PoolStatus {
    pub closed: bool,
    pub size: u32,
    pub idle: usize,
}

/// GET /health
///
/// Reports pool state without touching the database.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let closed = state.db.is_closed();
    Json(HealthResponse {
        status: if closed { "closing" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        pool: PoolStatus {
            closed,
            size: state.db.size(),
            idle: state.db.idle(),
        },
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::tests::unreachable_config;
    use crate::db::Database;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            db: Database::connect_lazy(&unreachable_config()),
            legacy_default_session: false,
        })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let Json(body) = health(State(state())).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.pool.size, 0);
    }

    #[tokio::test]
    async fn health_reports_closed_pool() {
        let state = state();
        state.db.close().await;

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "closing");
        assert!(body.pool.closed);
    }
}
