//! Status enums for orders and payments.
//!
//! The source data for orders historically carried several coexisting status
//! vocabularies ("complete" vs "completed", "canceled" vs "cancelled"). All
//! inputs are normalized to one canonical enum at ingestion via [`FromStr`];
//! queries then match on the enum, never on raw strings.

use serde::{Deserialize, Serialize};

/// Canonical order lifecycle status.
///
/// Not a strict state machine: admin tooling may move an order between any
/// of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order still needs attention on the dashboard.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }

    /// Whether the order counts toward revenue.
    #[must_use]
    pub const fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Completed | Self::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    /// Parse a status string, accepting legacy synonyms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "new" | "placed" => Ok(Self::Pending),
            "processing" | "in_progress" | "in progress" => Ok(Self::Processing),
            "completed" | "complete" | "done" | "fulfilled" => Ok(Self::Completed),
            "delivered" | "shipped" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment status recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::Paid => write!(f, "paid"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}
