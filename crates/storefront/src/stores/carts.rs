//! Cart store: one cart per user, created lazily, cleared on checkout.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use laced_core::UserId;

use super::StoreError;
use crate::models::Cart;

/// In-memory carts keyed by [`UserId`].
///
/// Cart state is not safety-critical: concurrent writers to the same cart
/// are last-write-wins within the mutation closure.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<HashMap<UserId, Cart>>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user's cart, if they have one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn get(&self, user_id: UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self.read()?.get(&user_id).cloned())
    }

    /// Mutate a user's cart, creating an empty one first if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn modify<R>(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut Cart) -> R,
    ) -> Result<R, StoreError> {
        let mut carts = self.write()?;
        let cart = carts.entry(user_id).or_insert_with(|| Cart::new(user_id));
        let result = f(cart);
        // A cart emptied by its last removal is dropped, so `count` and the
        // user census treat it the same as never having had one.
        if cart.is_empty() {
            carts.remove(&user_id);
        }
        Ok(result)
    }

    /// Drop a user's cart entirely (successful checkout).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn clear(&self, user_id: UserId) -> Result<(), StoreError> {
        self.write()?.remove(&user_id);
        Ok(())
    }

    /// Users that currently have a cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn user_ids(&self) -> Result<Vec<UserId>, StoreError> {
        Ok(self.read()?.keys().copied().collect())
    }

    /// Number of live carts.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<UserId, Cart>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("cart lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<UserId, Cart>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("cart lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartItem;
    use laced_core::ProductId;
    use rust_decimal::Decimal;

    fn item(quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(1),
            name: "Shoe".to_string(),
            price: Decimal::new(100, 0),
            discount_price: None,
            image: None,
            size: 9,
            color: "Black".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_modify_creates_on_first_use() {
        let store = CartStore::new();
        let user = UserId::new(1);
        assert!(store.get(user).unwrap().is_none());

        store
            .modify(user, |cart| cart.items.push(item(2)))
            .unwrap();
        assert_eq!(store.get(user).unwrap().unwrap().count(), 2);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_emptied_cart_is_dropped() {
        let store = CartStore::new();
        let user = UserId::new(1);
        store
            .modify(user, |cart| cart.items.push(item(1)))
            .unwrap();
        store.modify(user, |cart| cart.items.clear()).unwrap();
        assert!(store.get(user).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_clear_removes_cart() {
        let store = CartStore::new();
        let user = UserId::new(7);
        store
            .modify(user, |cart| cart.items.push(item(1)))
            .unwrap();
        store.clear(user).unwrap();
        assert!(store.get(user).unwrap().is_none());
        assert!(store.user_ids().unwrap().is_empty());
    }
}
