//! Repositories for the `brands` and `phone_models` tables.

use sqlx::PgPool;

use fixdesk_core::types::DbId;

use crate::models::phone::{Brand, CreateBrand, CreatePhoneModel, PhoneModel, UpdatePhoneModel};
use crate::{clamp_limit, clamp_offset};

/// Column list for `brands` queries.
const BRAND_COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for `phone_models` queries.
const MODEL_COLUMNS: &str = "id, brand_id, name, created_at, updated_at";

/// Provides CRUD operations for brands.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a new brand, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name) VALUES ($1) RETURNING {BRAND_COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a brand by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all brands, ordered by name ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {BRAND_COLUMNS} FROM brands ORDER BY name ASC");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    /// Delete a brand by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides CRUD operations for phone models.
pub struct PhoneModelRepo;

impl PhoneModelRepo {
    /// Insert a new phone model, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePhoneModel,
    ) -> Result<PhoneModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO phone_models (brand_id, name) \
             VALUES ($1, $2) \
             RETURNING {MODEL_COLUMNS}"
        );
        sqlx::query_as::<_, PhoneModel>(&query)
            .bind(input.brand_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a phone model by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PhoneModel>, sqlx::Error> {
        let query = format!("SELECT {MODEL_COLUMNS} FROM phone_models WHERE id = $1");
        sqlx::query_as::<_, PhoneModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List phone models, optionally filtered by brand, ordered by name.
    pub async fn list(
        pool: &PgPool,
        brand_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PhoneModel>, sqlx::Error> {
        let query = format!(
            "SELECT {MODEL_COLUMNS} FROM phone_models
             WHERE ($1::bigint IS NULL OR brand_id = $1)
             ORDER BY name ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PhoneModel>(&query)
            .bind(brand_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Update a phone model. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePhoneModel,
    ) -> Result<Option<PhoneModel>, sqlx::Error> {
        let query = format!(
            "UPDATE phone_models SET
                brand_id = COALESCE($2, brand_id),
                name = COALESCE($3, name)
             WHERE id = $1
             RETURNING {MODEL_COLUMNS}"
        );
        sqlx::query_as::<_, PhoneModel>(&query)
            .bind(id)
            .bind(input.brand_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a phone model by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM phone_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
