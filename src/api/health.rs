use axum::Json;
use serde_json::{json, Value};

/// Liveness probe, outside the authenticated surface
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "recipe-api",
    }))
}
