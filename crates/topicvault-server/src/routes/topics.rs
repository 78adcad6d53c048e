//! Topic registry routes: admin CRUD and the evaluator title list.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::error;

use crate::state::AppState;
use topicvault_core::Error;
use topicvault_ingest::validate_topic;
use topicvault_store::{NewTopic, TopicUpdate};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/topics", get(list_topics).post(create_topic))
        .route("/admin/topics/{id}", put(update_topic).delete(delete_topic))
        .route("/user/titles", get(list_titles))
}

/// Class year arrives as text from the form and as a number from some clients.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearField {
    Text(String),
    Number(i64),
}

impl YearField {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicRequest {
    title: Option<String>,
    group_leader: Option<String>,
    group_members: Option<Vec<String>>,
    faculty: Option<String>,
    class_year: Option<YearField>,
    submission_date: Option<String>,
    status: Option<String>,
}

type ApiResponse = (StatusCode, Json<serde_json::Value>);

fn message(status: StatusCode, msg: impl Into<String>) -> ApiResponse {
    (status, Json(serde_json::json!({ "message": msg.into() })))
}

fn server_error(e: Error) -> ApiResponse {
    error!("Topic route error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "message": "Server error", "error": e.to_string() })),
    )
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_submission_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Empty strings mean "not provided".
fn submission_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiResponse> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_submission_date(s).map(Some).ok_or_else(|| {
            message(
                StatusCode::BAD_REQUEST,
                format!("Invalid submission date: {}", s),
            )
        }),
    }
}

/// GET /api/admin/topics: all topics, newest submission first.
async fn list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_topics() {
        Ok(topics) => (StatusCode::OK, Json(serde_json::json!(topics))),
        Err(e) => server_error(e),
    }
}

/// POST /api/admin/topics: validate, embed and store a topic.
async fn create_topic(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TopicRequest>,
) -> impl IntoResponse {
    // The title verdict comes before any complaint about other fields.
    if let Err(rejection) = validate_topic(req.title.as_deref().unwrap_or_default()) {
        return message(StatusCode::BAD_REQUEST, rejection.message());
    }

    let date = match submission_date(req.submission_date.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let missing: Vec<&str> = [
        ("groupLeader", req.group_leader.as_deref()),
        ("faculty", req.faculty.as_deref()),
    ]
    .into_iter()
    .filter(|(_, v)| v.map_or(true, |s| s.trim().is_empty()))
    .map(|(name, _)| name)
    .chain(req.class_year.is_none().then_some("classYear"))
    .collect();
    if !missing.is_empty() {
        return message(
            StatusCode::BAD_REQUEST,
            format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    let topic = NewTopic {
        title: req.title.unwrap_or_default(),
        group_leader: req.group_leader.unwrap_or_default(),
        group_members: req.group_members.unwrap_or_default(),
        faculty: req.faculty.unwrap_or_default(),
        class_year: req.class_year.map(YearField::into_string).unwrap_or_default(),
        submission_date: date,
        status: req.status,
    };

    match state.ingester().submit(topic) {
        Ok(topic) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Topic created successfully",
                "topic": topic,
            })),
        ),
        Err(Error::Validation(msg)) => message(StatusCode::BAD_REQUEST, msg),
        Err(e) => server_error(e),
    }
}

/// PUT /api/admin/topics/:id. A new title is re-validated and re-embedded.
async fn update_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<TopicRequest>,
) -> impl IntoResponse {
    let date = match submission_date(req.submission_date.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let update = TopicUpdate {
        title: req.title,
        group_leader: req.group_leader,
        group_members: req.group_members,
        faculty: req.faculty,
        class_year: req.class_year.map(YearField::into_string),
        submission_date: date,
        status: req.status,
    };

    match state.ingester().revise(id, update) {
        Ok(Some(topic)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Topic updated successfully",
                "topic": topic,
            })),
        ),
        Ok(None) => message(StatusCode::NOT_FOUND, "Topic not found"),
        Err(Error::Validation(msg)) => message(StatusCode::BAD_REQUEST, msg),
        Err(e) => server_error(e),
    }
}

/// DELETE /api/admin/topics/:id
async fn delete_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.delete_topic(id) {
        Ok(true) => message(StatusCode::OK, "Topic deleted successfully"),
        Ok(false) => message(StatusCode::NOT_FOUND, "Topic not found"),
        Err(e) => server_error(e),
    }
}

/// GET /api/user/titles: id and title of every topic.
async fn list_titles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_titles() {
        Ok(titles) => (StatusCode::OK, Json(serde_json::json!(titles))),
        Err(e) => server_error(e),
    }
}
