use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Endpoint de prueba simple
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vehicle-service",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
