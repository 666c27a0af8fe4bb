//! Catalog product records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use laced_core::ProductId;

/// A product in the catalog.
///
/// Stock is tracked per size only and shared across all colors of the
/// product; a color variant has no quantity of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Open string category (e.g., "running", "casual").
    pub category: String,
    pub brand: String,
    /// Base price, >= 0.
    pub price: Decimal,
    /// Optional sale price. Conventionally below `price`, not enforced.
    pub discount_price: Option<Decimal>,
    /// Per-size stock breakdown. Size values are unique within a product.
    pub sizes: Vec<SizeStock>,
    /// Available colors. No per-color stock.
    pub colors: Vec<ColorVariant>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Stock quantity for a single size of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeStock {
    pub size: u32,
    pub quantity: u32,
}

/// A color variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    pub name: String,
    /// CSS color value for swatches (e.g., "#1a1a1a").
    pub code: String,
    /// Image references for this color.
    pub images: Vec<String>,
}

impl Product {
    /// Total stock across all sizes.
    #[must_use]
    pub fn total_stock(&self) -> u32 {
        self.sizes.iter().map(|s| s.quantity).sum()
    }

    /// Stock for one size; 0 if the size is not carried.
    #[must_use]
    pub fn stock_for_size(&self, size: u32) -> u32 {
        self.sizes
            .iter()
            .find(|s| s.size == size)
            .map_or(0, |s| s.quantity)
    }

    /// Primary image for display, preferring the first color's first image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.colors
            .iter()
            .flat_map(|c| c.images.iter())
            .next()
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Trail Runner".to_string(),
            description: "Lightweight trail shoe".to_string(),
            category: "running".to_string(),
            brand: "Laced".to_string(),
            price: Decimal::new(1299, 0),
            discount_price: None,
            sizes: vec![
                SizeStock { size: 8, quantity: 4 },
                SizeStock { size: 9, quantity: 3 },
            ],
            colors: vec![ColorVariant {
                name: "Black".to_string(),
                code: "#000000".to_string(),
                images: vec!["trail-black-1.jpg".to_string()],
            }],
            featured: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_stock_sums_sizes() {
        assert_eq!(sample().total_stock(), 7);
    }

    #[test]
    fn test_stock_for_missing_size_is_zero() {
        let product = sample();
        assert_eq!(product.stock_for_size(9), 3);
        assert_eq!(product.stock_for_size(12), 0);
    }

    #[test]
    fn test_primary_image() {
        assert_eq!(sample().primary_image(), Some("trail-black-1.jpg"));
    }
}
