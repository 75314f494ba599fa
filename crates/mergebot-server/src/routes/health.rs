use axum::Json;

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ok": true,
        "timestamp": chrono::Utc::now().timestamp_millis(),
    }))
}
