//! Order store: append-only ledger of placed orders.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use laced_core::{OrderId, OrderStatus, UserId};

use super::StoreError;
use crate::models::{NewOrder, Order};

#[derive(Default)]
struct Ledger {
    next_id: i64,
    orders: Vec<Order>,
}

/// In-memory order ledger.
///
/// Orders are created exactly once per checkout and never deleted; only
/// `status` changes afterwards, via admin tooling.
#[derive(Clone, Default)]
pub struct OrderStore {
    inner: Arc<RwLock<Ledger>>,
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new order, assigning its ID and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        let mut ledger = self.write()?;
        ledger.next_id += 1;
        let order = Order {
            id: OrderId::new(ledger.next_id),
            user_id: new_order.user_id,
            lines: new_order.lines,
            total: new_order.total,
            status: OrderStatus::Pending,
            payment_status: new_order.payment_status,
            created_at: Utc::now(),
        };
        ledger.orders.push(order.clone());
        Ok(order)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.read()?.orders.iter().find(|o| o.id == id).cloned())
    }

    /// Update an order's status (admin surface). Returns `false` if the
    /// order does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<bool, StoreError> {
        let mut ledger = self.write()?;
        match ledger.orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Snapshot of every order, used by the statistics aggregator.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.read()?.orders.clone())
    }

    /// The most recent `limit` orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn recent(&self, limit: usize) -> Result<Vec<Order>, StoreError> {
        let ledger = self.read()?;
        Ok(ledger.orders.iter().rev().take(limit).cloned().collect())
    }

    /// Number of orders ever placed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.orders.len())
    }

    /// Users that have placed at least one order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unavailable.
    pub fn user_ids(&self) -> Result<Vec<UserId>, StoreError> {
        Ok(self.read()?.orders.iter().map(|o| o.user_id).collect())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Ledger>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("order lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Ledger>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("order lock poisoned"))
    }
}
