//! Product browsing route handlers (read-only projections).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use laced_core::ProductId;

use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Stock response for one (product, size) pair.
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub product_id: ProductId,
    pub size: u32,
    pub available: u32,
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog().get(ProductId::new(id))?))
}

/// Featured products, newest first.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let limit = state.config().featured_limit;
    Ok(Json(state.catalog().list_featured(limit)?))
}

/// Current stock for one size of a product.
#[instrument(skip(state))]
pub async fn stock(
    State(state): State<AppState>,
    Path((id, size)): Path<(i64, u32)>,
) -> Result<Json<StockResponse>> {
    let product_id = ProductId::new(id);
    let available = state.catalog().available_stock(product_id, size)?;
    Ok(Json(StockResponse {
        product_id,
        size,
        available,
    }))
}

/// Distinct categories across the catalog.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().distinct_categories()?))
}

/// Distinct brands across the catalog.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().distinct_brands()?))
}
