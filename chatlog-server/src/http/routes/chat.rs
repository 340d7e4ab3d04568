//! Chat history endpoints
//!
//! Both answer 200 with `code: 0` whatever the store outcome; the typed
//! store error is logged by the repository and collapsed here.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::db::ChatHistoryRepo;
use crate::http::envelope::{
    ChatHistory, Envelope, StoreStatus, MSG_HISTORY_OK, MSG_STORE_FAILED, MSG_STORE_OK,
};
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{reject_nul, SessionId};

/// Store one turn
#[derive(Debug, Deserialize)]
pub struct StoreContentRequest {
    pub user_id: i64,
    pub session_id: Option<String>,
    /// `"user"` or `"assistant"` by convention; not enforced
    pub role: String,
    pub content: String,
}

/// Fetch a whole conversation
#[derive(Debug, Deserialize)]
pub struct ChatHistoryRequest {
    pub user_id: i64,
    pub session_id: Option<String>,
}

fn resolve_session(state: &AppState, raw: Option<&str>) -> Result<SessionId, ApiError> {
    let session = SessionId::resolve(raw, state.legacy_default_session)?;
    if raw.is_none() {
        tracing::warn!(
            session_id = %session,
            "session_id omitted, using legacy default conversation"
        );
    }
    Ok(session)
}

/// POST /store_content - persist one turn
async fn store_content(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<StoreContentRequest>,
) -> Result<Json<Envelope<StoreStatus>>, ApiError> {
    let session = resolve_session(&state, req.session_id.as_deref())?;
    reject_nul("role", &req.role)?;
    reject_nul("content", &req.content)?;

    let stored = ChatHistoryRepo::new(&state.db)
        .insert_turn(req.user_id, &session, &req.role, &req.content)
        .await;

    let (msg, status) = match stored {
        Ok(_) => (MSG_STORE_OK, true),
        Err(_) => (MSG_STORE_FAILED, false),
    };

    Ok(Json(Envelope::ok(msg, StoreStatus { status })))
}

/// POST /get_chat_history - all turns of a conversation, oldest first
async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ChatHistoryRequest>,
) -> Result<Json<Envelope<ChatHistory>>, ApiError> {
    let session = resolve_session(&state, req.session_id.as_deref())?;

    // Failure and "no turns yet" look the same on the wire; the repository
    // logs them apart.
    let chat_history = ChatHistoryRepo::new(&state.db)
        .fetch_history(req.user_id, &session)
        .await
        .unwrap_or_default();

    Ok(Json(Envelope::ok(MSG_HISTORY_OK, ChatHistory { chat_history })))
}

/// Chat routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/store_content", post(store_content))
        .route("/get_chat_history", post(get_chat_history))
}
