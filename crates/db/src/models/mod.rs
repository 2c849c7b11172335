//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `Validate` where fields
//!   have constraints worth checking before hitting the database)
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod customer;
pub mod dashboard;
pub mod part;
pub mod phone;
pub mod repair;
pub mod supplier;
pub mod warranty;
