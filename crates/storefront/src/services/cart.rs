//! Cart engine: add, update, remove, view, count.
//!
//! Adding is optimistic: the only catalog check at add time is product
//! existence. Stock is enforced at checkout, so browsing stays fast even
//! when a size is about to sell out.

use laced_core::{ProductId, UserId};
use thiserror::Error;
use tracing::instrument;

use crate::models::{CartItem, CartView, LineKey};
use crate::services::pricing;
use crate::stores::{CartStore, CatalogError, CatalogStore, StoreError};

/// Cart operation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(id) => Self::ProductNotFound(id),
            CatalogError::Store(e) => Self::Store(e),
            // The cart engine only reads the catalog; stock and size-shape
            // errors cannot reach it.
            _ => Self::Store(StoreError::Unavailable("unexpected catalog error")),
        }
    }
}

/// The cart engine. Cheap to clone; clones share the underlying stores.
#[derive(Clone)]
pub struct CartService {
    catalog: CatalogStore,
    carts: CartStore,
}

impl CartService {
    #[must_use]
    pub const fn new(catalog: CatalogStore, carts: CartStore) -> Self {
        Self { catalog, carts }
    }

    /// Add `quantity` units of a (product, size, color) selection to the
    /// user's cart, merging into an existing line with the same key.
    ///
    /// Captures a fresh price snapshot only when a new line is created; an
    /// existing line keeps its original snapshot.
    ///
    /// # Errors
    ///
    /// `CartError::ProductNotFound` if the product does not exist,
    /// `CartError::InvalidQuantity` if `quantity < 1`.
    #[instrument(skip(self), fields(user = %user_id))]
    pub fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        size: u32,
        color: &str,
        quantity: i64,
    ) -> Result<CartView, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(i64::MAX))?;

        let product = self.catalog.get(product_id)?;
        let snapshot = CartItem {
            product_id,
            name: product.name.clone(),
            price: product.price,
            discount_price: product.discount_price,
            image: product.primary_image().map(str::to_owned),
            size,
            color: color.to_owned(),
            quantity,
        };
        debug_assert_eq!(snapshot.unit_price(), pricing::product_price(&product));

        let view = self.carts.modify(user_id, |cart| {
            let key = snapshot.key();
            if let Some(line) = cart.line_mut(&key) {
                line.quantity = line.quantity.saturating_add(quantity);
            } else {
                cart.items.push(snapshot);
            }
            CartView::from(&*cart)
        })?;
        Ok(view)
    }

    /// Remove the line matching `key`. Removing an absent line is a no-op,
    /// not an error.
    ///
    /// # Errors
    ///
    /// `CartError::Store` if the store is unavailable.
    #[instrument(skip(self), fields(user = %user_id))]
    pub fn remove_item(&self, user_id: UserId, key: &LineKey) -> Result<CartView, CartError> {
        if self.carts.get(user_id)?.is_none() {
            return Ok(CartView::empty());
        }
        let view = self.carts.modify(user_id, |cart| {
            cart.items.retain(|item| &item.key() != key);
            CartView::from(&*cart)
        })?;
        Ok(view)
    }

    /// Set the quantity of the line matching `key`.
    ///
    /// A quantity of 0 removes the line; setting an absent line is a no-op.
    ///
    /// # Errors
    ///
    /// `CartError::InvalidQuantity` for negative quantities.
    #[instrument(skip(self), fields(user = %user_id))]
    pub fn set_quantity(
        &self,
        user_id: UserId,
        key: &LineKey,
        quantity: i64,
    ) -> Result<CartView, CartError> {
        if quantity < 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return self.remove_item(user_id, key);
        }
        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(i64::MAX))?;

        if self.carts.get(user_id)?.is_none() {
            return Ok(CartView::empty());
        }
        let view = self.carts.modify(user_id, |cart| {
            if let Some(line) = cart.line_mut(key) {
                line.quantity = quantity;
            }
            CartView::from(&*cart)
        })?;
        Ok(view)
    }

    /// The user's priced cart view, computed from add-time snapshots.
    ///
    /// # Errors
    ///
    /// `CartError::Store` if the store is unavailable.
    pub fn view(&self, user_id: UserId) -> Result<CartView, CartError> {
        Ok(self
            .carts
            .get(user_id)?
            .as_ref()
            .map_or_else(CartView::empty, CartView::from))
    }

    /// Sum of quantities in the user's cart; 0 for a user with no cart.
    ///
    /// # Errors
    ///
    /// `CartError::Store` if the store is unavailable.
    pub fn count(&self, user_id: UserId) -> Result<u32, CartError> {
        Ok(self.carts.get(user_id)?.map_or(0, |cart| cart.count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, SizeStock};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn service_with_product() -> CartService {
        let catalog = CatalogStore::new();
        catalog
            .upsert(Product {
                id: ProductId::new(1),
                name: "Court Classic".to_string(),
                description: String::new(),
                category: "casual".to_string(),
                brand: "Laced".to_string(),
                price: Decimal::new(1299, 0),
                discount_price: Some(Decimal::new(899, 0)),
                sizes: vec![SizeStock { size: 9, quantity: 3 }],
                colors: Vec::new(),
                featured: false,
                created_at: Utc::now(),
            })
            .unwrap();
        CartService::new(catalog, CartStore::new())
    }

    fn key() -> LineKey {
        LineKey {
            product_id: ProductId::new(1),
            size: 9,
            color: "Black".to_string(),
        }
    }

    #[test]
    fn test_add_merges_same_key() {
        let service = service_with_product();
        let user = UserId::new(1);

        service.add_item(user, ProductId::new(1), 9, "Black", 2).unwrap();
        let view = service.add_item(user, ProductId::new(1), 9, "Black", 2).unwrap();

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.count, 4);
        // Snapshot discount price applies.
        assert_eq!(view.total, Decimal::new(899, 0) * Decimal::from(4u32));
    }

    #[test]
    fn test_add_different_color_is_new_line() {
        let service = service_with_product();
        let user = UserId::new(1);

        service.add_item(user, ProductId::new(1), 9, "Black", 1).unwrap();
        let view = service.add_item(user, ProductId::new(1), 9, "White", 1).unwrap();
        assert_eq!(view.items.len(), 2);
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let service = service_with_product();
        let err = service
            .add_item(UserId::new(1), ProductId::new(99), 9, "Black", 1)
            .unwrap_err();
        assert_eq!(err, CartError::ProductNotFound(ProductId::new(99)));
    }

    #[test]
    fn test_add_non_positive_quantity_fails() {
        let service = service_with_product();
        let err = service
            .add_item(UserId::new(1), ProductId::new(1), 9, "Black", 0)
            .unwrap_err();
        assert_eq!(err, CartError::InvalidQuantity(0));
    }

    #[test]
    fn test_view_uses_snapshot_not_live_price() {
        let service = service_with_product();
        let user = UserId::new(1);
        service.add_item(user, ProductId::new(1), 9, "Black", 1).unwrap();

        // Admin raises the price mid-session.
        let mut product = service.catalog.get(ProductId::new(1)).unwrap();
        product.discount_price = None;
        product.price = Decimal::new(9999, 0);
        service.catalog.upsert(product).unwrap();

        let view = service.view(user).unwrap();
        assert_eq!(view.total, Decimal::new(899, 0));
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let service = service_with_product();
        let view = service.remove_item(UserId::new(1), &key()).unwrap();
        assert_eq!(view.count, 0);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let service = service_with_product();
        let user = UserId::new(1);
        service.add_item(user, ProductId::new(1), 9, "Black", 2).unwrap();

        let view = service.set_quantity(user, &key(), 0).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(service.count(user).unwrap(), 0);
    }

    #[test]
    fn test_set_quantity_negative_fails() {
        let service = service_with_product();
        let err = service.set_quantity(UserId::new(1), &key(), -3).unwrap_err();
        assert_eq!(err, CartError::InvalidQuantity(-3));
    }

    #[test]
    fn test_count_without_cart_is_zero() {
        let service = service_with_product();
        assert_eq!(service.count(UserId::new(42)).unwrap(), 0);
    }
}
