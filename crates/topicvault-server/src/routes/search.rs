//! Duplicate-topic search and standalone title validation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::state::AppState;
use topicvault_ingest::{validate_topic, Verdict};
use topicvault_resolve::SearchOutcome;
use topicvault_store::Topic;

pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", post(search))
        .route("/validate", post(validate))
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

/// Wire shape of a search response. `topics[i]` pairs with `similarities[i]`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarities: Option<Vec<f64>>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_validation_error: Option<bool>,
}

impl SearchResponse {
    fn failed() -> Self {
        Self {
            found: false,
            topics: None,
            similarities: None,
            message: SEARCH_FAILED_MESSAGE.to_string(),
            is_validation_error: None,
        }
    }
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let message = outcome.message();
        match outcome {
            SearchOutcome::Rejected(_) => Self {
                found: false,
                topics: None,
                similarities: None,
                message,
                is_validation_error: Some(true),
            },
            SearchOutcome::NoTopics | SearchOutcome::NoMatch => Self {
                found: false,
                topics: None,
                similarities: None,
                message,
                is_validation_error: None,
            },
            SearchOutcome::Found(matches) => {
                let (topics, similarities): (Vec<Topic>, Vec<f64>) = matches
                    .into_iter()
                    .map(|m| (m.topic, m.similarity))
                    .unzip();
                Self {
                    found: true,
                    topics: Some(topics),
                    similarities: Some(similarities),
                    message,
                    is_validation_error: None,
                }
            }
        }
    }
}

/// POST /api/search: find stored topics similar to the query.
///
/// A body that is not `{ "query": <string> }` gets the same failure response
/// as a storage error.
async fn search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Unreadable search request: {}", rejection.body_text());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failed()),
            );
        }
    };

    match state.search().run(&req.query) {
        Ok(outcome) => (StatusCode::OK, Json(SearchResponse::from(outcome))),
        Err(e) => {
            error!("Search error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failed()),
            )
        }
    }
}

#[derive(Deserialize)]
struct ValidateRequest {
    #[serde(default)]
    title: String,
}

/// POST /api/validate: run the topic validator without storing or searching.
async fn validate(Json(req): Json<ValidateRequest>) -> Json<Verdict> {
    Json(validate_topic(&req.title).into())
}
