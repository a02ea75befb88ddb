#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use edubattle_api::{config::Config, create_router, services::AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory store; every call gets isolated state.
pub fn create_test_app() -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let config = Config::in_memory();
    let store = Arc::new(edubattle_api::storage::MemoryStore::new());
    create_router(Arc::new(AppState::with_store(config, store)))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "non-JSON body for {} {}: {}",
                method,
                uri,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn create_tournament(app: &Router, max_participants: u32) -> String {
    let (status, body) = post(
        app,
        "/api/v1/tournaments",
        json!({
            "name": "Autumn Cup",
            "subject": "math",
            "test_id": "quiz-1",
            "start_date": "2026-10-20T09:00:00Z",
            "duration": 30,
            "max_participants": max_participants,
            "type": "1vs1",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Three questions whose correct options are 0, 1 and 3.
pub async fn create_quiz(app: &Router) -> String {
    let question = |correct: usize| {
        json!({
            "question": format!("Question with answer {}", correct),
            "options": ["a", "b", "c", "d"],
            "correct": correct,
        })
    };
    let (status, body) = post(
        app,
        "/api/v1/tests",
        json!({
            "title": "Fractions",
            "subject": "math",
            "duration": 15,
            "questions": [question(0), question(1), question(3)],
            "created_by": "instructor-1",
            "status": "active",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_team(app: &Router, leader_id: &str, max_members: u32) -> String {
    let (status, body) = post(
        app,
        "/api/v1/teams",
        json!({
            "name": "Owls",
            "subject": "physics",
            "leader_id": leader_id,
            "leader_name": "Leader",
            "max_members": max_members,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["id"].as_str().unwrap().to_string()
}
