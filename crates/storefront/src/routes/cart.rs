//! Cart and checkout route handlers.
//!
//! Every handler resolves the user from the `X-User-Id` header and returns
//! the updated priced cart view, so a client can re-render without a second
//! round trip.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use laced_core::ProductId;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{CartView, LineKey, Order};
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub size: u32,
    pub color: String,
    /// Defaults to 1.
    pub quantity: Option<i64>,
}

/// Update line quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub product_id: ProductId,
    pub size: u32,
    pub color: String,
    pub quantity: i64,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub product_id: ProductId,
    pub size: u32,
    pub color: String,
}

/// Cart count response body.
#[derive(Debug, serde::Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

/// Get the current priced cart view.
#[instrument(skip(state))]
pub async fn view(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CartView>> {
    Ok(Json(state.cart_service().view(user_id)?))
}

/// Get the cart count badge value.
#[instrument(skip(state))]
pub async fn count(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CartCountResponse>> {
    let count = state.cart_service().count(user_id)?;
    Ok(Json(CartCountResponse { count }))
}

/// Add an item to the cart, merging into an existing line with the same
/// (product, size, color) key.
#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(form): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let view = state.cart_service().add_item(
        user_id,
        form.product_id,
        form.size,
        &form.color,
        form.quantity.unwrap_or(1),
    )?;
    Ok(Json(view))
}

/// Set a line's quantity. A quantity of 0 removes the line.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(form): Json<UpdateItemRequest>,
) -> Result<Json<CartView>> {
    let key = LineKey {
        product_id: form.product_id,
        size: form.size,
        color: form.color,
    };
    let view = state
        .cart_service()
        .set_quantity(user_id, &key, form.quantity)?;
    Ok(Json(view))
}

/// Remove a line from the cart. Removing an absent line is a no-op.
#[instrument(skip(state, form))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(form): Json<RemoveItemRequest>,
) -> Result<Json<CartView>> {
    let key = LineKey {
        product_id: form.product_id,
        size: form.size,
        color: form.color,
    };
    let view = state.cart_service().remove_item(user_id, &key)?;
    Ok(Json(view))
}

/// Convert the cart into an order, decrementing stock all-or-nothing.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Order>> {
    Ok(Json(state.checkout_service().checkout(user_id)?))
}
