#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::build_router;
use trivia_api::transfer::import_data;

// same helpers as the crate's internal test_utils module, which integration
// tests cannot reach
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub async fn empty_pool() -> SqlitePool {
    let pool = establish_connection("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

// 6 categories, 19 questions
pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    import_data(&pool, &fixtures_dir())
        .await
        .expect("Failed to import fixtures");
    pool
}

pub async fn setup() -> (Router, SqlitePool) {
    let pool = seeded_pool().await;
    (build_router(pool.clone()), pool)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

pub fn assert_error(body: &Value, code: u16, message: &str) {
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], code);
    assert_eq!(body["message"], message);
}
