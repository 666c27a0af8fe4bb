//! Admin dashboard route handler.
//!
//! Returns the statistics as plain JSON, suitable for both page rendering
//! and a machine-readable status endpoint. The aggregator never fails: a
//! broken metric degrades to its default instead of taking the page down.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::services::DashboardStats;
use crate::state::AppState;

/// Point-in-time dashboard statistics.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.stats_service().dashboard_stats())
}
