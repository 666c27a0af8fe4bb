//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{CartService, CheckoutService, StatsService};
use crate::stores::{CartStore, CatalogStore, OrderStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the stores and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    carts: CartStore,
    orders: OrderStore,
}

impl AppState {
    /// Create a new application state with empty stores.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_stores(config, CatalogStore::new(), CartStore::new(), OrderStore::new())
    }

    /// Create application state over existing stores (used by tests and
    /// admin tooling that seeds the catalog).
    #[must_use]
    pub fn with_stores(
        config: StorefrontConfig,
        catalog: CatalogStore,
        carts: CartStore,
        orders: OrderStore,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// The cart engine over this state's stores.
    #[must_use]
    pub fn cart_service(&self) -> CartService {
        CartService::new(self.inner.catalog.clone(), self.inner.carts.clone())
    }

    /// The checkout reconciler over this state's stores.
    #[must_use]
    pub fn checkout_service(&self) -> CheckoutService {
        CheckoutService::new(
            self.inner.catalog.clone(),
            self.inner.carts.clone(),
            self.inner.orders.clone(),
        )
    }

    /// The statistics aggregator over this state's stores.
    #[must_use]
    pub fn stats_service(&self) -> StatsService {
        StatsService::new(
            self.inner.catalog.clone(),
            self.inner.carts.clone(),
            self.inner.orders.clone(),
            self.inner.config.low_stock_threshold,
            self.inner.config.recent_activity_limit,
        )
    }
}
