//! Repository for the `repairs` table, including the status transition
//! operation that keeps repairs and warranties consistent.

use chrono::Utc;
use sqlx::PgPool;

use fixdesk_core::repair::{
    plan_transition, RepairStatus, TransitionEffect, TransitionError, TransitionOutcome,
};
use fixdesk_core::types::DbId;
use fixdesk_core::warranty::{
    expiry_from, month_bucket, sequential_id, TICKET_PREFIX, WARRANTY_ID_PREFIX,
};

use crate::models::repair::{CreateRepair, Repair, RepairFilter, UpdateRepair};
use crate::repositories::counter_repo::{CounterRepo, SCOPE_TICKET, SCOPE_WARRANTY};
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ticket_no, customer_id, phone, problems, status, \
    deposit_cents, price_cents, is_rework, created_at, updated_at";

/// Why a status transition did not commit.
///
/// The whole operation runs in one transaction, so any error here means no
/// mutation was applied at all.
#[derive(Debug, thiserror::Error)]
pub enum TransitionStatusError {
    #[error("repair {0} not found")]
    RepairNotFound(DbId),

    #[error(transparent)]
    NotAllowed(#[from] TransitionError),

    /// A warranty already exists for this repair; a second first-time pickup
    /// must not issue another one.
    #[error("warranty already issued for repair {0}")]
    WarrantyAlreadyIssued(DbId),

    /// Rework completion found no warranty row for the repair.
    #[error("no warranty on file for repair {0}")]
    WarrantyMissing(DbId),

    /// The status write itself failed.
    #[error("status write failed")]
    StatusWrite(#[source] sqlx::Error),

    /// The warranty-side mutation failed.
    #[error("warranty write failed")]
    WarrantyWrite(#[source] sqlx::Error),
}

/// Provides CRUD and lifecycle operations for repair tickets.
pub struct RepairRepo;

impl RepairRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new repair ticket with a generated `RT-YYYY-MM-NNNN` ticket
    /// number. Status starts at `pending`.
    pub async fn create(pool: &PgPool, input: &CreateRepair) -> Result<Repair, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let now = Utc::now();
        let seq = CounterRepo::next(&mut tx, SCOPE_TICKET, &month_bucket(now)).await?;
        let ticket_no = sequential_id(TICKET_PREFIX, now, seq);

        let query = format!(
            "INSERT INTO repairs
                (ticket_no, customer_id, phone, problems, status, deposit_cents, price_cents)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let repair = sqlx::query_as::<_, Repair>(&query)
            .bind(&ticket_no)
            .bind(input.customer_id)
            .bind(&input.phone)
            .bind(&input.problems)
            .bind(RepairStatus::Pending.as_str())
            .bind(input.deposit_cents)
            .bind(input.price_cents)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(repair)
    }

    /// Find a repair by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Repair>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM repairs WHERE id = $1");
        sqlx::query_as::<_, Repair>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List repairs, newest first, with optional status/customer filters.
    pub async fn list(
        pool: &PgPool,
        filter: &RepairFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Repair>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repairs
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR customer_id = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Repair>(&query)
            .bind(&filter.status)
            .bind(filter.customer_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Update editable repair fields. Only non-`None` fields in `input` are
    /// applied. Status is out of bounds here; use [`Self::transition_status`].
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRepair,
    ) -> Result<Option<Repair>, sqlx::Error> {
        let query = format!(
            "UPDATE repairs SET
                customer_id = COALESCE($2, customer_id),
                phone = COALESCE($3, phone),
                problems = COALESCE($4, problems),
                deposit_cents = COALESCE($5, deposit_cents),
                price_cents = COALESCE($6, price_cents)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Repair>(&query)
            .bind(id)
            .bind(input.customer_id)
            .bind(&input.phone)
            .bind(&input.problems)
            .bind(input.deposit_cents)
            .bind(input.price_cents)
            .fetch_optional(pool)
            .await
    }

    /// Delete a repair by ID. Returns `true` if a row was removed. Warranty
    /// rows are left untouched (no cascading cleanup).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM repairs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Apply a status transition atomically.
    ///
    /// One transaction covers everything: the repair row is locked with
    /// `FOR UPDATE`, the transition is planned against the authoritative
    /// rework flag, the status write and any warranty side effect are
    /// applied, then the transaction commits. An error at any step rolls the
    /// whole operation back, so a repair can never end up with a new status
    /// but a missed warranty mutation.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        requested: RepairStatus,
    ) -> Result<TransitionOutcome, TransitionStatusError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(TransitionStatusError::StatusWrite)?;

        let row: Option<(bool,)> =
            sqlx::query_as("SELECT is_rework FROM repairs WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(TransitionStatusError::StatusWrite)?;
        let Some((is_rework,)) = row else {
            return Err(TransitionStatusError::RepairNotFound(id));
        };

        let plan = plan_transition(is_rework, requested)?;

        sqlx::query("UPDATE repairs SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(plan.next_status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(TransitionStatusError::StatusWrite)?;

        let outcome = match plan.effect {
            TransitionEffect::None => TransitionOutcome::StatusOnly {
                status: plan.next_status,
            },

            TransitionEffect::IssueWarranty => {
                let exists: (bool,) = sqlx::query_as(
                    "SELECT EXISTS(SELECT 1 FROM warranties WHERE repair_id = $1)",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(TransitionStatusError::WarrantyWrite)?;
                if exists.0 {
                    return Err(TransitionStatusError::WarrantyAlreadyIssued(id));
                }

                let now = Utc::now();
                let seq = CounterRepo::next(&mut tx, SCOPE_WARRANTY, &month_bucket(now))
                    .await
                    .map_err(TransitionStatusError::WarrantyWrite)?;
                let warranty_id = sequential_id(WARRANTY_ID_PREFIX, now, seq);
                let expires_at = expiry_from(now);

                sqlx::query(
                    "INSERT INTO warranties (id, repair_id, created_at, expires_at) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(&warranty_id)
                .bind(id)
                .bind(now)
                .bind(expires_at)
                .execute(&mut *tx)
                .await
                .map_err(TransitionStatusError::WarrantyWrite)?;

                tracing::info!(repair_id = id, warranty_id = %warranty_id, "Warranty issued");

                TransitionOutcome::WarrantyIssued {
                    status: plan.next_status,
                    warranty_id,
                    expires_at,
                }
            }

            TransitionEffect::CompleteRework => {
                // Clearing the repair's rework flag belongs to the pickup
                // step, so its failure reports as a failed pickup.
                sqlx::query("UPDATE repairs SET is_rework = false WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(TransitionStatusError::WarrantyWrite)?;

                let updated: Option<(i32,)> = sqlx::query_as(
                    "UPDATE warranties \
                     SET is_rework = false, rework_count = rework_count + 1 \
                     WHERE repair_id = $1 \
                     RETURNING rework_count",
                )
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(TransitionStatusError::WarrantyWrite)?;
                let Some((rework_count,)) = updated else {
                    return Err(TransitionStatusError::WarrantyMissing(id));
                };

                tracing::info!(repair_id = id, rework_count, "Rework completed");

                TransitionOutcome::ReworkCompleted {
                    status: plan.next_status,
                    rework_count,
                }
            }
        };

        let commit_err = if matches!(plan.effect, TransitionEffect::None) {
            TransitionStatusError::StatusWrite
        } else {
            TransitionStatusError::WarrantyWrite
        };
        tx.commit().await.map_err(commit_err)?;
        Ok(outcome)
    }
}
