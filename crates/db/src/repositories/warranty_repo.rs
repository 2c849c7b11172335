//! Repository for the `warranties` table.

use chrono::Utc;
use sqlx::PgPool;

use fixdesk_core::repair::RepairStatus;
use fixdesk_core::types::DbId;

use crate::models::warranty::{Warranty, WarrantyWithRepair};
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, repair_id, is_rework, rework_count, created_at, expires_at";

/// Why a rework could not be started.
#[derive(Debug, thiserror::Error)]
pub enum StartReworkError {
    #[error("warranty '{0}' not found")]
    NotFound(String),

    #[error("warranty '{0}' has expired")]
    Expired(String),

    #[error("warranty '{0}' is already under rework")]
    AlreadyInRework(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides read and rework operations for warranties.
pub struct WarrantyRepo;

impl WarrantyRepo {
    /// Find a warranty by its human-readable id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM warranties WHERE id = $1");
        sqlx::query_as::<_, Warranty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the warranty covering a repair, if one has been issued.
    pub async fn find_by_repair(
        pool: &PgPool,
        repair_id: DbId,
    ) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM warranties WHERE repair_id = $1");
        sqlx::query_as::<_, Warranty>(&query)
            .bind(repair_id)
            .fetch_optional(pool)
            .await
    }

    /// List warranties with their repair and customer, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<WarrantyWithRepair>, sqlx::Error> {
        sqlx::query_as::<_, WarrantyWithRepair>(
            "SELECT
                w.id, w.repair_id, w.is_rework, w.rework_count,
                w.created_at, w.expires_at,
                r.ticket_no, r.phone AS repair_phone,
                c.name AS customer_name
             FROM warranties w
             JOIN repairs r ON r.id = w.repair_id
             JOIN customers c ON c.id = r.customer_id
             ORDER BY w.created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(clamp_limit(limit))
        .bind(clamp_offset(offset))
        .fetch_all(pool)
        .await
    }

    /// Start a rework cycle under a warranty.
    ///
    /// In one transaction: locks the warranty, rejects if it has expired or
    /// is already in rework, then flips the rework flags on both the
    /// warranty and the covered repair and moves the repair to `reworking`.
    pub async fn start_rework(pool: &PgPool, id: &str) -> Result<Warranty, StartReworkError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM warranties WHERE id = $1 FOR UPDATE");
        let warranty: Option<Warranty> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(warranty) = warranty else {
            return Err(StartReworkError::NotFound(id.to_string()));
        };

        if warranty.expires_at < Utc::now() {
            return Err(StartReworkError::Expired(id.to_string()));
        }
        if warranty.is_rework {
            return Err(StartReworkError::AlreadyInRework(id.to_string()));
        }

        let query = format!(
            "UPDATE warranties SET is_rework = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated: Warranty = sqlx::query_as(&query).bind(id).fetch_one(&mut *tx).await?;

        sqlx::query("UPDATE repairs SET is_rework = true, status = $2 WHERE id = $1")
            .bind(warranty.repair_id)
            .bind(RepairStatus::Reworking.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(warranty_id = id, repair_id = warranty.repair_id, "Rework started");
        Ok(updated)
    }
}
