//! Domain models for the storefront.
//!
//! Catalog, cart, and order records plus the derived view types returned by
//! the JSON API. All persistence lives in [`crate::stores`]; these types are
//! plain data.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartItem, CartLineView, CartView, LineKey};
pub use order::{NewOrder, Order, OrderLine};
pub use product::{ColorVariant, Product, SizeStock};
