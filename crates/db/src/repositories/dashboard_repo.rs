//! Aggregate queries for the dashboard.

use sqlx::PgPool;

use fixdesk_core::repair::RepairStatus;

use crate::models::dashboard::{DashboardStats, StatusCount};

/// Provides read-only aggregate statistics.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Collect all dashboard figures.
    ///
    /// Revenue counts repairs in `picked_up` whose last mutation fell in the
    /// given calendar month (pickup is the last mutation under normal flow).
    pub async fn get_stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let (month_revenue,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price_cents), 0)::BIGINT FROM repairs \
             WHERE status = $1 \
               AND date_trunc('month', updated_at) = date_trunc('month', NOW())",
        )
        .bind(RepairStatus::PickedUp.as_str())
        .fetch_one(pool)
        .await?;

        let (previous_revenue,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price_cents), 0)::BIGINT FROM repairs \
             WHERE status = $1 \
               AND date_trunc('month', updated_at) \
                   = date_trunc('month', NOW() - interval '1 month')",
        )
        .bind(RepairStatus::PickedUp.as_str())
        .fetch_one(pool)
        .await?;

        let repairs_by_status: Vec<StatusCount> = sqlx::query_as(
            "SELECT status, COUNT(*) AS count FROM repairs \
             GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let (total_customers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await?;

        let (active_reworks,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM warranties WHERE is_rework = true")
                .fetch_one(pool)
                .await?;

        Ok(DashboardStats {
            month_revenue_cents: month_revenue,
            previous_month_revenue_cents: previous_revenue,
            revenue_change_pct: percent_change(previous_revenue, month_revenue),
            repairs_by_status,
            total_customers,
            active_reworks,
        })
    }
}

/// Percent change from `previous` to `current`; `None` when there is no
/// previous baseline to compare against.
fn percent_change(previous: i64, current: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    Some((current - previous) as f64 / previous as f64 * 100.0)
}
