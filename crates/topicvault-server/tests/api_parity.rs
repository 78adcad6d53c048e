//! API parity tests: response shapes the web client depends on.
//!
//! Each test builds the real router over a temporary store and drives it
//! with `oneshot`, so no listener is needed.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rusqlite::Connection;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use topicvault_core::{DataPaths, TopicVaultConfig};
use topicvault_infer::{create_embedder, Vocabulary};
use topicvault_server::{build_router, AppState};
use topicvault_store::{NewTopic, SqliteStore};

struct TestApp {
    state: Arc<AppState>,
    router: Router,
    _dir: TempDir,
}

fn test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = TopicVaultConfig {
        port: 0,
        data_paths: DataPaths::new(dir.path()).unwrap(),
        persist_backfill: false,
    };
    let store = SqliteStore::open(&config.data_paths.db).unwrap();
    let embedder = create_embedder(Arc::new(Vocabulary::default()));
    let state = Arc::new(AppState::new(config, store, embedder));
    TestApp {
        router: build_router(state.clone()),
        state,
        _dir: dir,
    }
}

fn new_topic(title: &str) -> NewTopic {
    NewTopic {
        title: title.to_string(),
        group_leader: "Hodan Abdi".into(),
        group_members: vec!["Ayaan Nur".into(), "Guled Farah".into()],
        faculty: "Computer Science".into(),
        class_year: "2024".into(),
        ..Default::default()
    }
}

async fn call(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn search(app: &TestApp, query: &str) -> (StatusCode, Value) {
    call(app, Method::POST, "/api/search", Some(json!({ "query": query }))).await
}

/// Search: { found: false, message, isValidationError: true } for a bad query.
#[tokio::test]
async fn test_search_validation_error_shape() {
    let app = test_app();
    let (status, body) = search(&app, "12345").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
    assert_eq!(body["message"], "Numbers alone are not valid research topics");
    assert_eq!(body["isValidationError"], true);
    assert!(body.get("topics").is_none());
}

/// Search: a body without a string `query` is a failed search, not a 422.
#[tokio::test]
async fn test_search_unreadable_body() {
    let app = test_app();
    let bodies = [json!({ "query": null }), json!({}), json!({ "query": 42 })];
    for body in bodies {
        let (status, response) = call(&app, Method::POST, "/api/search", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response,
            json!({ "found": false, "message": "Search failed. Please try again." })
        );
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/search")
        .header("content-type", "text/plain")
        .body(Body::from("mobile banking"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["found"], false);
    assert_eq!(body["message"], "Search failed. Please try again.");
}

#[tokio::test]
async fn test_search_empty_registry() {
    let app = test_app();
    let (status, body) = search(&app, "AI impact on education systems").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
    assert_eq!(
        body["message"],
        "No research topics found. This idea appears to be unique!"
    );
    assert!(body.get("isValidationError").is_none());
}

#[tokio::test]
async fn test_search_no_similar_topics() {
    let app = test_app();
    app.state
        .ingester()
        .submit(new_topic("Blockchain for online business"))
        .unwrap();

    let (_, body) = search(&app, "Machine learning in medical science").await;
    assert_eq!(body["found"], false);
    assert_eq!(
        body["message"],
        "No similar research topics found. This idea appears to be unique!"
    );
}

/// Search: { found: true, topics: [...], similarities: [...], message }.
#[tokio::test]
async fn test_search_found_shape() {
    let app = test_app();
    let stored = app
        .state
        .ingester()
        .submit(new_topic("Impact of mobile banking adoption in rural Somalia"))
        .unwrap();

    let (status, body) = search(
        &app,
        "The impact of mobile banking on rural Somali communities",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], true);
    assert_eq!(
        body["message"],
        "Similar research topics found in the database."
    );

    let topics = body["topics"].as_array().unwrap();
    let similarities = body["similarities"].as_array().unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(similarities.len(), topics.len());

    let topic = &topics[0];
    assert_eq!(topic["id"], stored.id);
    assert_eq!(topic["groupLeader"], "Hodan Abdi");
    assert_eq!(topic["groupMembers"], json!(["Ayaan Nur", "Guled Farah"]));
    assert_eq!(topic["classYear"], "2024");
    assert_eq!(topic["status"], "pending");
    assert!(topic["submissionDate"].is_string());
    assert!(topic.get("embedding").is_none());

    let score = similarities[0].as_f64().unwrap();
    assert!(score > 0.3 && score <= 1.0);
}

#[tokio::test]
async fn test_create_topic() {
    let app = test_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/admin/topics",
        Some(json!({
            "title": "Solar power for remote clinics",
            "groupLeader": "Hodan Abdi",
            "groupMembers": ["Ayaan Nur"],
            "faculty": "Engineering",
            "classYear": 2023,
            "submissionDate": "2024-03-15",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Topic created successfully");
    assert_eq!(body["topic"]["classYear"], "2023");
    assert!(body["topic"]["submissionDate"]
        .as_str()
        .unwrap()
        .starts_with("2024-03-15"));

    let id = body["topic"]["id"].as_i64().unwrap();
    let stored = app.state.store.get_topic(id).unwrap().unwrap();
    assert!(stored.stored_embedding().is_some());
}

#[tokio::test]
async fn test_create_topic_rejections() {
    let app = test_app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/admin/topics",
        Some(json!({
            "title": "12345",
            "groupLeader": "Hodan Abdi",
            "faculty": "Engineering",
            "classYear": "2023",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Numbers alone are not valid research topics");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/admin/topics",
        Some(json!({ "title": "Solar power for remote clinics", "faculty": "Engineering" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Missing required fields: groupLeader, classYear"
    );

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/admin/topics",
        Some(json!({ "title": "12345", "faculty": "Engineering" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Numbers alone are not valid research topics");

    assert_eq!(app.state.store.count_topics().unwrap(), 0);
}

#[tokio::test]
async fn test_update_and_delete_topic() {
    let app = test_app();
    let stored = app
        .state
        .ingester()
        .submit(new_topic("Cloud security framework for hospitals"))
        .unwrap();
    let uri = format!("/api/admin/topics/{}", stored.id);

    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Topic updated successfully");
    assert_eq!(body["topic"]["status"], "approved");
    assert_eq!(
        body["topic"]["title"],
        "Cloud security framework for hospitals"
    );

    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({ "title": "hello world" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a proper research topic title");

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Topic deleted successfully");

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Topic not found");
}

#[tokio::test]
async fn test_update_unknown_topic() {
    let app = test_app();
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/admin/topics/999",
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Topic not found");
}

#[tokio::test]
async fn test_list_topics_and_titles() {
    let app = test_app();
    let ingester = app.state.ingester();
    let first = ingester
        .submit(new_topic("Smart irrigation system for small farms"))
        .unwrap();
    let second = ingester
        .submit(new_topic("Digital health records in public hospitals"))
        .unwrap();

    let (status, body) = call(&app, Method::GET, "/api/admin/topics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = call(&app, Method::GET, "/api/user/titles", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles = body.as_array().unwrap();
    assert_eq!(titles.len(), 2);
    for entry in titles {
        assert!(entry["id"].is_number());
        assert!(entry["title"].is_string());
        assert_eq!(entry.as_object().unwrap().len(), 2);
    }
    let ids: Vec<i64> = titles.iter().map(|t| t["id"].as_i64().unwrap()).collect();
    assert!(ids.contains(&first.id) && ids.contains(&second.id));
}

#[tokio::test]
async fn test_stats_shape() {
    let app = test_app();
    app.state
        .ingester()
        .submit(new_topic("Smart irrigation system for small farms"))
        .unwrap();
    app.state
        .store
        .add_topic(&new_topic("Digital health records in public hospitals"), None)
        .unwrap();

    let (status, body) = call(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topics"], 2);
    assert_eq!(body["embeddedTopics"], 1);
    assert_eq!(body["legacyTopics"], 1);
    assert_eq!(body["embeddingDimension"], 100);
    assert_eq!(body["maxResults"], 5);
    assert!(body["similarityThreshold"].is_number());
    assert!(body["dbSizeMb"].is_number());
}

/// Storage failures: search keeps its own shape, topic routes report the error.
#[tokio::test]
async fn test_storage_failure_shapes() {
    let app = test_app();
    app.state
        .ingester()
        .submit(new_topic("Smart irrigation system for small farms"))
        .unwrap();

    let db_file = app.state.config.data_paths.db.join("topicvault.db");
    Connection::open(&db_file)
        .unwrap()
        .execute_batch("DROP TABLE topics;")
        .unwrap();

    let (status, body) = search(&app, "Smart irrigation for small farms").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "found": false, "message": "Search failed. Please try again." })
    );

    let (status, body) = call(&app, Method::GET, "/api/admin/topics", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
    assert!(body["error"].is_string());

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/admin/topics",
        Some(json!({
            "title": "Solar power for remote clinics",
            "groupLeader": "Hodan Abdi",
            "faculty": "Engineering",
            "classYear": "2023",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
    assert!(body["error"].is_string());
}

/// Validate: { isValid, error }.
#[tokio::test]
async fn test_validate_shape() {
    let app = test_app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/validate",
        Some(json!({ "title": "AI impact on education systems" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "isValid": true, "error": "" }));

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/validate",
        Some(json!({ "title": "My favourite football team" })),
    )
    .await;
    assert_eq!(body["isValid"], false);
    assert_eq!(
        body["error"],
        "Please enter a proper research topic with clear academic focus"
    );
}
