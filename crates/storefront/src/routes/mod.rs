//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Products (browsing projections)
//! GET  /products/featured          - Featured products
//! GET  /products/{id}              - Product detail
//! GET  /products/{id}/stock/{size} - Current stock for one size
//! GET  /categories                 - Distinct categories
//! GET  /brands                     - Distinct brands
//!
//! # Cart (requires X-User-Id)
//! GET    /cart                     - Priced cart view
//! GET    /cart/count               - Sum of quantities
//! POST   /cart/items               - Add item (merges same product/size/color)
//! PATCH  /cart/items               - Set line quantity (0 removes)
//! DELETE /cart/items               - Remove line
//! POST   /checkout                 - Convert cart into an order
//!
//! # Admin
//! GET  /admin/dashboard            - Dashboard statistics
//! ```

pub mod cart;
pub mod dashboard;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/featured", get(products::featured))
        .route("/{id}", get(products::show))
        .route("/{id}/stock/{size}", get(products::stock))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::view))
        .route("/count", get(cart::count))
        .route(
            "/items",
            post(cart::add).patch(cart::update).delete(cart::remove),
        )
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard::show))
}

/// Assemble the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/admin", admin_routes())
        .route("/checkout", post(cart::checkout))
        .route("/categories", get(products::categories))
        .route("/brands", get(products::brands))
}
