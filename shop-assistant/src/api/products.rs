//! Product catalog endpoint

use axum::Json;
use axum::extract::State;
use shared::models::Catalog;
use std::sync::Arc;

use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /api/products - the full cached catalog
pub async fn list_products(State(state): State<AppState>) -> ServiceResult<Json<Arc<Catalog>>> {
    let catalog = state.catalog.get_catalog().await?;
    Ok(Json(catalog))
}
