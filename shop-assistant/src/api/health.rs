//! Service banner and health check

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Shop assistant API is running. POST /api/chat to ask about products.",
    }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shop-assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_loaded": state.catalog.is_loaded(),
    }))
}
