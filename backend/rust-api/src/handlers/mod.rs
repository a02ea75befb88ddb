use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;

pub mod matches;
pub mod quizzes;
pub mod rankings;
pub mod teams;
pub mod tournaments;
pub mod users;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.repo.store();
    let mut storage = serde_json::Map::new();
    storage.insert("backend".to_string(), json!(store.backend_name()));

    let healthy = match tokio::time::timeout(std::time::Duration::from_secs(1), store.ping()).await
    {
        Ok(Ok(())) => {
            storage.insert("status".to_string(), json!("healthy"));
            true
        }
        Ok(Err(e)) => {
            storage.insert("status".to_string(), json!("unhealthy"));
            storage.insert("error".to_string(), json!(format!("{:#}", e)));
            false
        }
        Err(_) => {
            storage.insert("status".to_string(), json!("unhealthy"));
            storage.insert("error".to_string(), json!("ping timeout after 1s"));
            false
        }
    };

    let (status_code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "service": "edubattle-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": { "storage": storage }
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}
