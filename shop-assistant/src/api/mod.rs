//! API routes for shop-assistant

pub mod chat;
pub mod health;
pub mod products;

use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/products", get(products::list_products))
        .route("/chat", post(chat::chat));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(60),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
