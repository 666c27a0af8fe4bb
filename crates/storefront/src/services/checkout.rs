//! Checkout reconciler: converts a cart into an immutable order.
//!
//! Checkout is the only path that mutates stock from cart-originated demand.
//! Validation and decrement happen together under the catalog's write lock
//! ([`CatalogStore::reserve_lines`]), so two simultaneous checkouts can
//! never both pass the stock check and drive a quantity negative. If the
//! order cannot be persisted after stock was reserved, the reservation is
//! compensated by restocking before the error is returned.

use laced_core::{PaymentStatus, ProductId, UserId};
use thiserror::Error;
use tracing::instrument;

use crate::models::{Cart, NewOrder, Order, OrderLine};
use crate::stores::{CartStore, CatalogError, CatalogStore, OrderStore, StockDemand, StoreError};

/// Checkout failures. The cart and all stock are left unchanged for every
/// variant except `Persistence`, which restocks before returning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("product {0} no longer exists")]
    ProductNotFound(ProductId),

    #[error(
        "insufficient stock for product {product_id} size {size}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        size: u32,
        requested: u32,
        available: u32,
    },

    #[error("order could not be persisted: {0}")]
    Persistence(StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CatalogError> for CheckoutError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(id) => Self::ProductNotFound(id),
            CatalogError::InsufficientStock {
                product_id,
                size,
                requested,
                available,
            } => Self::InsufficientStock {
                product_id,
                size,
                requested,
                available,
            },
            CatalogError::Store(e) => Self::Store(e),
            CatalogError::DuplicateSize { .. } => {
                Self::Store(StoreError::Unavailable("unexpected catalog error"))
            }
        }
    }
}

/// The checkout reconciler.
#[derive(Clone)]
pub struct CheckoutService {
    catalog: CatalogStore,
    carts: CartStore,
    orders: OrderStore,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(catalog: CatalogStore, carts: CartStore, orders: OrderStore) -> Self {
        Self {
            catalog,
            carts,
            orders,
        }
    }

    /// Convert the user's cart into an order.
    ///
    /// Re-verifies every line against *current* stock (not the add-time
    /// snapshot), decrements all lines atomically, persists the order, then
    /// clears the cart. All-or-nothing: if any line fails, no stock moves
    /// and the cart is untouched.
    ///
    /// # Errors
    ///
    /// `EmptyCart`, `ProductNotFound`, `InsufficientStock` (with the failing
    /// line's requested/available), or `Persistence`.
    #[instrument(skip(self), fields(user = %user_id))]
    pub fn checkout(&self, user_id: UserId) -> Result<Order, CheckoutError> {
        let cart = self
            .carts
            .get(user_id)?
            .filter(|cart| !cart.is_empty())
            .ok_or(CheckoutError::EmptyCart)?;

        let demands: Vec<StockDemand> = cart
            .items
            .iter()
            .map(|item| StockDemand {
                product_id: item.product_id,
                size: item.size,
                quantity: item.quantity,
            })
            .collect();

        // Validate and decrement every line under one catalog write lock.
        self.catalog.reserve_lines(&demands)?;

        let order = match self.orders.insert(build_order(&cart)) {
            Ok(order) => order,
            Err(e) => {
                // Compensate the reservation so stock matches reality.
                if let Err(release_err) = self.catalog.release_lines(&demands) {
                    tracing::error!(
                        error = %release_err,
                        "failed to restock after order persistence failure"
                    );
                }
                return Err(CheckoutError::Persistence(e));
            }
        };

        // The order exists either way; a stale cart is an inconvenience,
        // not a consistency problem.
        if let Err(e) = self.carts.clear(user_id) {
            tracing::warn!(order = %order.id, error = %e, "failed to clear cart after checkout");
        }

        tracing::info!(order = %order.id, total = %order.total, "checkout completed");
        Ok(order)
    }
}

fn build_order(cart: &Cart) -> NewOrder {
    NewOrder {
        user_id: cart.user_id,
        lines: cart
            .items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                name: item.name.clone(),
                unit_price: item.unit_price(),
                quantity: item.quantity,
                size: item.size,
                color: item.color.clone(),
            })
            .collect(),
        total: cart.total(),
        payment_status: PaymentStatus::Unpaid,
    }
}
