use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /health: liveness probe. Includes the live notification switch so
/// callers can tell "checked but sending is off" apart from a delivery fault.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "notifications_enabled": state.settings.snapshot().notification_enabled,
    }))
}
