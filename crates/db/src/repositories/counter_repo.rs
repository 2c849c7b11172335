//! Atomic sequence counters for human-readable identifiers.
//!
//! Counters are keyed by `(scope, bucket)`, e.g. `("warranty", "2026-08")`,
//! and advance with a single upsert, so concurrent callers can never
//! observe the same value. This replaces any scan-the-existing-ids approach,
//! which races under concurrent inserts.

use sqlx::PgConnection;

/// Counter scope for warranty identifiers.
pub const SCOPE_WARRANTY: &str = "warranty";

/// Counter scope for repair ticket numbers.
pub const SCOPE_TICKET: &str = "ticket";

/// Provides atomic next-sequence allocation.
pub struct CounterRepo;

impl CounterRepo {
    /// Allocate the next sequence number for a scope/bucket pair.
    ///
    /// Takes a `&mut PgConnection` so callers can allocate inside their own
    /// transaction; a rolled-back transaction may leave gaps in the
    /// sequence, which is acceptable (uniqueness matters, density does not).
    pub async fn next(
        conn: &mut PgConnection,
        scope: &str,
        bucket: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "INSERT INTO id_counters (scope, bucket, last_seq) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (scope, bucket) \
             DO UPDATE SET last_seq = id_counters.last_seq + 1 \
             RETURNING last_seq",
        )
        .bind(scope)
        .bind(bucket)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}
