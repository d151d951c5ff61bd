use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the poem generation API" }))
}
