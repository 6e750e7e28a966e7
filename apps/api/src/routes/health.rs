use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health, GET /api/health
/// Returns service status plus the simulator's mode info.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let mode = state.service.mode_info().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-api",
        "mode": mode,
    }))
}
