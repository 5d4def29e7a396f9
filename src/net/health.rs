use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub struct HealthState {
    pub connections: Arc<AtomicI64>,
    pub max_connections: i64,
    pub started_at: Instant,
}

pub async fn health(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "connections": state.connections.load(Ordering::SeqCst),
        "maxConns": state.max_connections,
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}

pub async fn stats(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    Json(json!({
        "connections": state.connections.load(Ordering::SeqCst),
        "maxConns": state.max_connections,
        "uptime": state.started_at.elapsed().as_secs(),
    }))
}
