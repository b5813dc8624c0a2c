use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::warn;

use crate::router::TrackerState;
use crate::service::categories;

/// GET /api
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Daily Tracker API is running",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "documentation": "/",
    }))
}

/// GET /health. Always 200; the body reports database reachability.
pub async fn health_check(State(state): State<TrackerState>) -> Json<Value> {
    let timestamp = Utc::now().to_rfc3339();
    match state.storage.ping().await {
        Ok(()) => Json(json!({
            "status": "healthy",
            "database": "connected",
            "timestamp": timestamp,
            "environment": "production",
        })),
        Err(e) => {
            warn!(error = %e, "health check could not reach database");
            Json(json!({
                "status": "unhealthy",
                "database": "disconnected",
                "error": e.to_string(),
                "timestamp": timestamp,
            }))
        }
    }
}

/// GET /categories
pub async fn list_categories() -> Json<Value> {
    Json(json!({ "categories": categories::as_json() }))
}
