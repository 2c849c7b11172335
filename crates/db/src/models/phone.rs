//! Brand and phone model reference data.

use fixdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a brand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBrand {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
}

/// A row from the `phone_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhoneModel {
    pub id: DbId,
    pub brand_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a phone model under a brand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePhoneModel {
    pub brand_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for updating a phone model. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhoneModel {
    pub brand_id: Option<DbId>,
    pub name: Option<String>,
}
