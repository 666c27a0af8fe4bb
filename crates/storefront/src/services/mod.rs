//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `pricing` - Effective price resolution (base vs. discount)
//! - `cart` - Cart engine: add/update/remove/view/count
//! - `checkout` - Checkout reconciler: cart -> immutable order
//! - `stats` - Dashboard statistics aggregator (read-only)

pub mod cart;
pub mod checkout;
pub mod pricing;
pub mod stats;

pub use cart::{CartError, CartService};
pub use checkout::{CheckoutError, CheckoutService};
pub use stats::{ActivityEntry, DashboardStats, StatsService};
