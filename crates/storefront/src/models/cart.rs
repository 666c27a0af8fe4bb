//! Cart records and the priced views derived from them.
//!
//! A cart line snapshots the product's name, prices, and image at add time.
//! All derived totals are computed from those snapshots, never from live
//! catalog prices, so a shopper sees a stable total even if an admin edits a
//! price mid-session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use laced_core::{CurrencyCode, Price, ProductId, UserId};

use crate::services::pricing;

/// Identity key for a cart line: two adds with the same key accumulate
/// quantity instead of creating a duplicate line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: u32,
    pub color: String,
}

/// One line in a cart: a (product, size, color) selection with a quantity
/// and an add-time price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Base price at add time.
    pub price: Decimal,
    /// Discount price at add time, if any.
    pub discount_price: Option<Decimal>,
    /// Display image at add time.
    pub image: Option<String>,
    pub size: u32,
    pub color: String,
    /// Always >= 1; a line at 0 is removed instead.
    pub quantity: u32,
}

impl CartItem {
    /// The merge key for this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            size: self.size,
            color: self.color.clone(),
        }
    }

    /// Effective unit price from the snapshot.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        pricing::effective_price(self.price, self.discount_price)
    }

    /// Line subtotal: unit price x quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// A user's cart. One per user, created lazily on first add.
///
/// Lines keep insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart for a user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Find the line matching a key, if present.
    pub fn line_mut(&mut self, key: &LineKey) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.key() == key)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line subtotals, from snapshot prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Priced cart view returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: Decimal,
    pub total_display: String,
    pub count: u32,
}

/// One priced line in a [`CartView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub size: u32,
    pub color: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub unit_price_display: String,
    pub subtotal: Decimal,
    pub subtotal_display: String,
    pub image: Option<String>,
}

impl CartView {
    /// An empty cart view for users with no cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
            total_display: Price::usd(Decimal::ZERO).display(),
            count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            items: cart.items.iter().map(CartLineView::from).collect(),
            total,
            total_display: Price::new(total, CurrencyCode::USD).display(),
            count: cart.count(),
        }
    }
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        let unit_price = item.unit_price();
        let subtotal = item.subtotal();
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            size: item.size,
            color: item.color.clone(),
            quantity: item.quantity,
            unit_price,
            unit_price_display: Price::usd(unit_price).display(),
            subtotal,
            subtotal_display: Price::usd(subtotal).display(),
            image: item.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: i64, size: u32, color: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            price: Decimal::new(1299, 0),
            discount_price: Some(Decimal::new(899, 0)),
            image: None,
            size,
            color: color.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_subtotal_uses_discount_snapshot() {
        let item = line(1, 9, "Black", 2);
        assert_eq!(item.unit_price(), Decimal::new(899, 0));
        assert_eq!(item.subtotal(), Decimal::new(1798, 0));
    }

    #[test]
    fn test_cart_totals() {
        let mut cart = Cart::new(UserId::new(1));
        cart.items.push(line(1, 9, "Black", 2));
        cart.items.push(line(2, 8, "White", 1));

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Decimal::new(2697, 0));

        let view = CartView::from(&cart);
        assert_eq!(view.count, 3);
        assert_eq!(view.total_display, "$2697.00");
        assert_eq!(view.items.len(), 2);
    }

    #[test]
    fn test_line_key_matches_product_size_color() {
        let mut cart = Cart::new(UserId::new(1));
        cart.items.push(line(1, 9, "Black", 2));

        let key = LineKey {
            product_id: ProductId::new(1),
            size: 9,
            color: "Black".to_string(),
        };
        assert!(cart.line_mut(&key).is_some());

        let other_color = LineKey {
            color: "White".to_string(),
            ..key
        };
        assert!(cart.line_mut(&other_color).is_none());
    }
}
