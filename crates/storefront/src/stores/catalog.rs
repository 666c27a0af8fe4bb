//! Catalog store: products keyed by ID, with conditional stock mutation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use laced_core::ProductId;
use thiserror::Error;

use super::StoreError;
use crate::models::Product;

/// A requested stock decrement for one (product, size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDemand {
    pub product_id: ProductId,
    pub size: u32,
    pub quantity: u32,
}

/// Catalog operation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Checkout-time stock shortfall. Carries requested/available for
    /// diagnostics.
    #[error(
        "insufficient stock for product {product_id} size {size}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        size: u32,
        requested: u32,
        available: u32,
    },

    #[error("product {product_id} lists size {size} more than once")]
    DuplicateSize { product_id: ProductId, size: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory product catalog keyed by [`ProductId`].
///
/// Cheaply cloneable; clones share the same underlying map.
#[derive(Clone, Default)]
pub struct CatalogStore {
    inner: Arc<RwLock<BTreeMap<ProductId, Product>>>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, replacing any existing record with the same ID.
    ///
    /// Catalog writes come from admin tooling; this is its entry point.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSize` if the product lists the same
    /// size value twice, or `StoreError` if the store is unavailable.
    pub fn upsert(&self, product: Product) -> Result<(), CatalogError> {
        validate_sizes(&product)?;
        let mut products = self.write()?;
        products.insert(product.id, product);
        Ok(())
    }

    /// Remove a product. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn remove(&self, id: ProductId) -> Result<bool, CatalogError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if absent.
    pub fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Current stock for a (product, size) pair; 0 for a size the product
    /// does not carry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if the product is absent.
    pub fn available_stock(&self, id: ProductId, size: u32) -> Result<u32, CatalogError> {
        let products = self.read()?;
        let product = products.get(&id).ok_or(CatalogError::ProductNotFound(id))?;
        Ok(product.stock_for_size(size))
    }

    /// Conditionally decrement stock for one (product, size) pair.
    ///
    /// The check and the write happen under one write lock: stock never goes
    /// below zero, and on failure no partial decrement occurs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InsufficientStock` if `amount` exceeds the
    /// available quantity (a size the product does not carry has 0 available).
    pub fn decrement_stock(
        &self,
        id: ProductId,
        size: u32,
        amount: u32,
    ) -> Result<(), CatalogError> {
        self.reserve_lines(&[StockDemand {
            product_id: id,
            size,
            quantity: amount,
        }])
    }

    /// Decrement stock for a whole set of demands, all-or-nothing.
    ///
    /// Validates every demand (accumulating demands that hit the same
    /// (product, size) pair) before touching any quantity, all under a single
    /// write lock. Either every demand is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns the first failing demand as `CatalogError::InsufficientStock`
    /// (with `available` reduced by earlier demands on the same pair), or
    /// `CatalogError::ProductNotFound`.
    pub fn reserve_lines(&self, demands: &[StockDemand]) -> Result<(), CatalogError> {
        let mut products = self.write()?;

        // Validation pass: nothing is mutated until every demand clears.
        let mut reserved: HashMap<(ProductId, u32), u32> = HashMap::new();
        for demand in demands {
            let product = products
                .get(&demand.product_id)
                .ok_or(CatalogError::ProductNotFound(demand.product_id))?;
            let key = (demand.product_id, demand.size);
            let already = reserved.get(&key).copied().unwrap_or(0);
            let available = product.stock_for_size(demand.size).saturating_sub(already);
            if demand.quantity > available {
                return Err(CatalogError::InsufficientStock {
                    product_id: demand.product_id,
                    size: demand.size,
                    requested: demand.quantity,
                    available,
                });
            }
            reserved.insert(key, already + demand.quantity);
        }

        // Apply pass: every key was validated above.
        for ((product_id, size), quantity) in reserved {
            if let Some(product) = products.get_mut(&product_id)
                && let Some(entry) = product.sizes.iter_mut().find(|s| s.size == size)
            {
                entry.quantity -= quantity;
            }
        }

        Ok(())
    }

    /// Restock a set of demands, compensating a reservation whose order
    /// could not be persisted.
    ///
    /// Pairs whose product or size has vanished in the meantime are skipped;
    /// compensation is best effort.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn release_lines(&self, demands: &[StockDemand]) -> Result<(), CatalogError> {
        let mut products = self.write()?;
        for demand in demands {
            if let Some(product) = products.get_mut(&demand.product_id)
                && let Some(entry) = product.sizes.iter_mut().find(|s| s.size == demand.size)
            {
                entry.quantity = entry.quantity.saturating_add(demand.quantity);
            }
        }
        Ok(())
    }

    /// Featured products, newest first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn list_featured(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let products = self.read()?;
        let mut featured: Vec<Product> = products.values().filter(|p| p.featured).cloned().collect();
        featured.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        featured.truncate(limit);
        Ok(featured)
    }

    /// Distinct categories across the catalog, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn distinct_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.distinct(|p| p.category.clone())
    }

    /// Distinct brands across the catalog, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn distinct_brands(&self) -> Result<Vec<String>, CatalogError> {
        self.distinct(|p| p.brand.clone())
    }

    /// Snapshot of every product, used by the statistics aggregator.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Number of products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.read()?.len())
    }

    fn distinct(&self, f: impl Fn(&Product) -> String) -> Result<Vec<String>, CatalogError> {
        let products = self.read()?;
        let set: HashSet<String> = products.values().map(f).collect();
        let mut values: Vec<String> = set.into_iter().collect();
        values.sort();
        Ok(values)
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<ProductId, Product>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("catalog lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<ProductId, Product>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("catalog lock poisoned"))
    }
}

fn validate_sizes(product: &Product) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for entry in &product.sizes {
        if !seen.insert(entry.size) {
            return Err(CatalogError::DuplicateSize {
                product_id: product.id,
                size: entry.size,
            });
        }
    }
    Ok(())
}
