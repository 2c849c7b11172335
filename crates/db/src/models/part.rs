//! Spare-part inventory models.

use fixdesk_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `parts` table. Money is integer cents.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Part {
    pub id: DbId,
    pub name: String,
    pub phone_model_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    pub stock: i32,
    pub cost_cents: Cents,
    pub price_cents: Cents,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a part.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePart {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub phone_model_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0))]
    pub cost_cents: Cents,
    #[validate(range(min = 0))]
    pub price_cents: Cents,
}

/// DTO for updating a part. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePart {
    pub name: Option<String>,
    pub phone_model_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    pub stock: Option<i32>,
    pub cost_cents: Option<Cents>,
    pub price_cents: Option<Cents>,
}
