//! Dashboard statistics models.

use fixdesk_core::types::Cents;
use serde::Serialize;
use sqlx::FromRow;

/// Repairs grouped by status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Aggregate figures for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Revenue from repairs picked up in the current calendar month.
    pub month_revenue_cents: Cents,
    /// Revenue from repairs picked up in the previous calendar month.
    pub previous_month_revenue_cents: Cents,
    /// Percent change vs the previous month; `None` when the previous month
    /// had no revenue.
    pub revenue_change_pct: Option<f64>,
    pub repairs_by_status: Vec<StatusCount>,
    pub total_customers: i64,
    /// Warranties currently back in the shop for rework.
    pub active_reworks: i64,
}
