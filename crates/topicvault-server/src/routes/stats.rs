//! Stats route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// GET /api/stats: registry statistics.
async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.get_stats() {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "topics": stats.total_topics,
                "embeddedTopics": stats.embedded_topics,
                "legacyTopics": stats.total_topics - stats.embedded_topics,
                "embeddingDimension": state.embedder.dimension(),
                "similarityThreshold": state.ranker.threshold(),
                "maxResults": state.ranker.max_results(),
                "dbSizeMb": stats.db_size_mb,
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "Server error", "error": e.to_string() })),
        ),
    }
}
