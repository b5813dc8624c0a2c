#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use daily_tracker::{Config, TrackerState, db::TrackerStorage, tracker_router};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<!doctype html><title>tracker test page</title>";

pub struct TestApp {
    pub app: Router,
    pub state: TrackerState,
    _dir: TempDir,
}

/// Router over a throwaway SQLite file and static directory.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("tracker.sqlite").display()
    );
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).expect("failed to create static dir");
    std::fs::write(static_dir.join("index.html"), INDEX_HTML).expect("failed to write index");

    let storage = TrackerStorage::connect(&database_url)
        .await
        .expect("failed to open test database");
    let cfg = Config {
        database_url,
        secret_key: "test-secret".to_string(),
        password_salt: "test-salt".to_string(),
        static_dir,
        ..Config::default()
    };
    let state = TrackerState::new(storage, &cfg);
    let app = tracker_router(state.clone());

    TestApp {
        app,
        state,
        _dir: dir,
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body was not json")
    }

    pub fn error_code(&self) -> String {
        self.json()["error"]["code"]
            .as_str()
            .expect("missing error code")
            .to_string()
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    TestResponse {
        status,
        headers,
        text: String::from_utf8(body.to_vec()).expect("response body was not utf-8"),
    }
}

/// Register a user and return `(token, user_id)`.
pub async fn register(app: &Router, email: &str, name: &str) -> (String, i64) {
    let resp = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            None,
            &serde_json::json!({
                "email": email,
                "password": "walking123",
                "name": name,
                "age": 30,
            }),
        ),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED, "register failed: {}", resp.text);
    let body = resp.json();
    (
        body["token"].as_str().expect("token").to_string(),
        body["user"]["id"].as_i64().expect("user id"),
    )
}
