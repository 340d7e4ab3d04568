//! Welcome endpoint

use axum::{routing::get, Json, Router};

use crate::http::envelope::{Envelope, MSG_WELCOME};

/// GET /
async fn welcome() -> Json<Envelope<&'static str>> {
    Json(Envelope::ok(MSG_WELCOME, ""))
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(welcome))
}
