//! Repository for the `parts` inventory table.

use sqlx::PgPool;

use fixdesk_core::types::DbId;

use crate::models::part::{CreatePart, Part, UpdatePart};
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone_model_id, supplier_id, stock, \
    cost_cents, price_cents, created_at, updated_at";

/// Provides CRUD and stock operations for spare parts.
pub struct PartRepo;

impl PartRepo {
    /// Insert a new part, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePart) -> Result<Part, sqlx::Error> {
        let query = format!(
            "INSERT INTO parts
                (name, phone_model_id, supplier_id, stock, cost_cents, price_cents)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(&input.name)
            .bind(input.phone_model_id)
            .bind(input.supplier_id)
            .bind(input.stock)
            .bind(input.cost_cents)
            .bind(input.price_cents)
            .fetch_one(pool)
            .await
    }

    /// Find a part by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Part>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parts WHERE id = $1");
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List parts, ordered by name, optionally filtered by phone model.
    pub async fn list(
        pool: &PgPool,
        phone_model_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Part>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parts
             WHERE ($1::bigint IS NULL OR phone_model_id = $1)
             ORDER BY name ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(phone_model_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// List parts whose stock is at or below a threshold, most depleted first.
    pub async fn list_low_stock(pool: &PgPool, threshold: i32) -> Result<Vec<Part>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parts WHERE stock <= $1 ORDER BY stock ASC, name ASC"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(threshold)
            .fetch_all(pool)
            .await
    }

    /// Update a part. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePart,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET
                name = COALESCE($2, name),
                phone_model_id = COALESCE($3, phone_model_id),
                supplier_id = COALESCE($4, supplier_id),
                stock = COALESCE($5, stock),
                cost_cents = COALESCE($6, cost_cents),
                price_cents = COALESCE($7, price_cents)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.phone_model_id)
            .bind(input.supplier_id)
            .bind(input.stock)
            .bind(input.cost_cents)
            .bind(input.price_cents)
            .fetch_optional(pool)
            .await
    }

    /// Adjust stock by a delta (positive restock, negative consumption).
    ///
    /// The schema CHECK keeps stock non-negative; over-consumption surfaces
    /// as a constraint violation.
    pub async fn adjust_stock(
        pool: &PgPool,
        id: DbId,
        delta: i32,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET stock = stock + $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }

    /// Delete a part by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
