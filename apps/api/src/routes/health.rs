use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness only; never touches storage.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
