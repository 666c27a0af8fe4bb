//! In-process keyed stores for catalog, carts, and orders.
//!
//! The engine is consumed in-process by the request layer, so persistence is
//! a set of keyed maps behind `Arc<RwLock<..>>`. Each store hands out clones
//! on read and applies writes under its lock; the catalog's conditional
//! stock decrement runs entirely under the write lock, which is what makes
//! concurrent checkouts safe (see [`catalog::CatalogStore::reserve_lines`]).
//!
//! # Stores
//!
//! - `catalog` - `ProductId -> Product`, with stock mutation
//! - `carts` - `UserId -> Cart`, created on first add, cleared on checkout
//! - `orders` - append-only order ledger

pub mod carts;
pub mod catalog;
pub mod orders;

pub use carts::CartStore;
pub use catalog::{CatalogError, CatalogStore, StockDemand};
pub use orders::OrderStore;

use thiserror::Error;

/// Failure of the underlying store itself (as opposed to a domain error).
///
/// With in-memory maps the only way a store becomes unavailable is a
/// poisoned lock, i.e. a writer panicked mid-update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(&'static str),
}
