//! Liveness endpoint

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

/// GET / - Plain-text banner
async fn root() -> &'static str {
    "Event Scheduler running"
}
