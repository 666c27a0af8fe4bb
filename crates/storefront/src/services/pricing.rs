//! Effective price resolution.
//!
//! Used identically by the cart engine (for add-time snapshots) and the
//! statistics aggregator (for revenue): the discount price wins when it is
//! present and numerically valid, otherwise the base price applies.

use rust_decimal::Decimal;

use crate::models::Product;

/// Resolve the effective unit price from a base price and an optional
/// discount. A negative discount is treated as invalid and ignored.
#[must_use]
pub fn effective_price(base: Decimal, discount: Option<Decimal>) -> Decimal {
    match discount {
        Some(d) if d >= Decimal::ZERO => d,
        _ => base,
    }
}

/// Effective unit price for a catalog product.
#[must_use]
pub fn product_price(product: &Product) -> Decimal {
    effective_price(product.price, product.discount_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_wins_when_present() {
        assert_eq!(
            effective_price(Decimal::new(1299, 0), Some(Decimal::new(899, 0))),
            Decimal::new(899, 0)
        );
    }

    #[test]
    fn test_base_when_discount_absent() {
        assert_eq!(
            effective_price(Decimal::new(1299, 0), None),
            Decimal::new(1299, 0)
        );
    }

    #[test]
    fn test_negative_discount_is_ignored() {
        assert_eq!(
            effective_price(Decimal::new(1299, 0), Some(Decimal::new(-1, 0))),
            Decimal::new(1299, 0)
        );
    }

    #[test]
    fn test_free_with_zero_discount() {
        assert_eq!(
            effective_price(Decimal::new(1299, 0), Some(Decimal::ZERO)),
            Decimal::ZERO
        );
    }
}
