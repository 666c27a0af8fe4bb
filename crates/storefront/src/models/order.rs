//! Order records.
//!
//! An order is created exactly once per checkout and never deleted. Each line
//! is a copy, not a reference, so later product edits do not retroactively
//! change historical orders. Only the status fields change after creation,
//! and only through admin tooling.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use laced_core::{OrderId, OrderStatus, PaymentStatus, ProductId, UserId};

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    /// Cart total at checkout time.
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// One purchased line, snapshotted from the cart at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    /// Effective unit price paid.
    pub unit_price: Decimal,
    pub quantity: u32,
    pub size: u32,
    pub color: String,
}

/// The data needed to persist a new order; the store assigns id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub payment_status: PaymentStatus,
}
