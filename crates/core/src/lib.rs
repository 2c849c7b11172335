//! Domain core for the fixdesk repair-shop backend.
//!
//! Pure logic only: status enums, the repair/warranty transition table, and
//! the human-readable identifier schemes. No I/O, no database types.

pub mod error;
pub mod repair;
pub mod types;
pub mod warranty;
