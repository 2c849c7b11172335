//! Warranty models.

use fixdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `warranties` table. The primary key is the human-readable
/// warranty id (`WTY-YYYY-MM-NNNN`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Warranty {
    pub id: String,
    pub repair_id: DbId,
    pub is_rework: bool,
    pub rework_count: i32,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// A warranty joined with its repair and customer, for list displays.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WarrantyWithRepair {
    pub id: String,
    pub repair_id: DbId,
    pub is_rework: bool,
    pub rework_count: i32,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub ticket_no: String,
    pub repair_phone: String,
    pub customer_name: String,
}
