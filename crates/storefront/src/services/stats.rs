//! Dashboard statistics aggregator.
//!
//! Pure read-side: recomputed on demand from the catalog, cart, and order
//! stores, never cached, never writing. Every metric is computed
//! independently; a failing sub-computation is logged and replaced by its
//! default so the dashboard degrades instead of disappearing.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use laced_core::{CurrencyCode, Price, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Order;
use crate::stores::{CartStore, CatalogStore, OrderStore};

/// Point-in-time dashboard metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: usize,
    /// Distinct users observed across carts and orders. Identity itself is
    /// an external surface; there is no local user table to count.
    pub total_users: usize,
    /// Orders still in a pending-like state (pending or processing).
    pub open_orders: usize,
    /// Products whose total stock is in `1..=low_stock_threshold`.
    pub low_stock_products: usize,
    /// Orders created since the start of the current UTC day.
    pub orders_today: usize,
    /// Sum of order totals over completed/delivered orders.
    pub total_revenue: Decimal,
    /// Revenue divided by the number of orders contributing to it; 0 when
    /// there are none.
    pub avg_order_value: Decimal,
    /// Most recent orders as human-readable activity, newest first.
    pub recent_activity: Vec<ActivityEntry>,
}

/// One entry in the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message: String,
    pub time_ago: String,
}

impl ActivityEntry {
    fn placeholder() -> Self {
        Self {
            message: "No orders yet".to_string(),
            time_ago: String::new(),
        }
    }
}

/// The statistics aggregator.
#[derive(Clone)]
pub struct StatsService {
    catalog: CatalogStore,
    carts: CartStore,
    orders: OrderStore,
    low_stock_threshold: u32,
    recent_limit: usize,
}

impl StatsService {
    #[must_use]
    pub const fn new(
        catalog: CatalogStore,
        carts: CartStore,
        orders: OrderStore,
        low_stock_threshold: u32,
        recent_limit: usize,
    ) -> Self {
        Self {
            catalog,
            carts,
            orders,
            low_stock_threshold,
            recent_limit,
        }
    }

    /// Compute the full dashboard snapshot.
    ///
    /// Infallible by design: each metric falls back to its default when its
    /// sub-computation fails, and the failure is logged.
    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        let now = Utc::now();

        let total_products = metric_or_default("total_products", self.catalog.count());
        let total_orders = metric_or_default("total_orders", self.orders.count());
        let total_users = metric_or_default("total_users", self.distinct_users());
        let open_orders = metric_or_default(
            "open_orders",
            self.orders
                .all()
                .map(|orders| orders.iter().filter(|o| o.status.is_open()).count()),
        );
        let low_stock_products = metric_or_default(
            "low_stock_products",
            self.catalog.all().map(|products| {
                products
                    .iter()
                    .filter(|p| {
                        let stock = p.total_stock();
                        stock >= 1 && stock <= self.low_stock_threshold
                    })
                    .count()
            }),
        );
        let orders_today = metric_or_default(
            "orders_today",
            self.orders.all().map(|orders| {
                let midnight = start_of_day(now);
                orders.iter().filter(|o| o.created_at >= midnight).count()
            }),
        );
        let (total_revenue, avg_order_value) =
            metric_or_default("revenue", self.revenue());
        let recent_activity =
            metric_or_default("recent_activity", self.recent_activity(now));

        DashboardStats {
            total_products,
            total_orders,
            total_users,
            open_orders,
            low_stock_products,
            orders_today,
            total_revenue,
            avg_order_value,
            recent_activity,
        }
    }

    fn distinct_users(&self) -> Result<usize, crate::stores::StoreError> {
        let mut users: HashSet<UserId> = self.carts.user_ids()?.into_iter().collect();
        users.extend(self.orders.user_ids()?);
        Ok(users.len())
    }

    fn revenue(&self) -> Result<(Decimal, Decimal), crate::stores::StoreError> {
        let orders = self.orders.all()?;
        let fulfilled: Vec<&Order> =
            orders.iter().filter(|o| o.status.is_fulfilled()).collect();
        let revenue: Decimal = fulfilled.iter().map(|o| o.total).sum();
        let avg = if fulfilled.is_empty() {
            Decimal::ZERO
        } else {
            (revenue / Decimal::from(fulfilled.len())).round_dp(2)
        };
        Ok((revenue, avg))
    }

    fn recent_activity(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ActivityEntry>, crate::stores::StoreError> {
        let recent = self.orders.recent(self.recent_limit)?;
        if recent.is_empty() {
            return Ok(vec![ActivityEntry::placeholder()]);
        }
        Ok(recent
            .iter()
            .map(|order| ActivityEntry {
                message: format!(
                    "Order #{} placed by user {} for {}",
                    order.id,
                    order.user_id,
                    Price::new(order.total, CurrencyCode::USD).display()
                ),
                time_ago: time_ago(now, order.created_at),
            })
            .collect())
    }
}

/// UTC midnight of the given instant's day.
fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |naive| naive.and_utc())
}

/// Human-readable elapsed time ("just now", "5 minutes ago", ...).
fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then).max(Duration::zero());
    if elapsed < Duration::minutes(1) {
        "just now".to_string()
    } else if elapsed < Duration::hours(1) {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed < Duration::days(1) {
        plural(elapsed.num_hours(), "hour")
    } else {
        plural(elapsed.num_days(), "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Use a metric's value, or log and substitute the default on failure.
fn metric_or_default<T: Default, E: std::fmt::Display>(
    name: &str,
    result: Result<T, E>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(metric = name, error = %e, "dashboard metric failed; using default");
            T::default()
        }
    }
}
