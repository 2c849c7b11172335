//! Repair ticket models.
//!
//! `status` is stored as the snake_case wire token of
//! [`fixdesk_core::repair::RepairStatus`]; the repository converts at the
//! boundary. Money is integer cents; `deposit_cents` may exceed
//! `price_cents` (no cross-field constraint, matching shop practice of
//! taking a deposit before the final quote).

use fixdesk_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `repairs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Repair {
    pub id: DbId,
    pub ticket_no: String,
    pub customer_id: DbId,
    pub phone: String,
    pub problems: Vec<String>,
    pub status: String,
    pub deposit_cents: Cents,
    pub price_cents: Cents,
    pub is_rework: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a repair ticket. Status starts at `pending`; the ticket
/// number is generated by the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRepair {
    pub customer_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub problems: Vec<String>,
    #[validate(range(min = 0))]
    pub deposit_cents: Cents,
    #[validate(range(min = 0))]
    pub price_cents: Cents,
}

/// DTO for editing repair fields directly. Status changes go through the
/// transition operation instead, never through this DTO.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRepair {
    pub customer_id: Option<DbId>,
    pub phone: Option<String>,
    pub problems: Option<Vec<String>>,
    pub deposit_cents: Option<Cents>,
    pub price_cents: Option<Cents>,
}

/// Query filter for listing repairs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepairFilter {
    pub status: Option<String>,
    pub customer_id: Option<DbId>,
}
