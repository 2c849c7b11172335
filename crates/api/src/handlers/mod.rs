//! HTTP handlers, one module per entity.

pub mod customer;
pub mod dashboard;
pub mod part;
pub mod phone;
pub mod repair;
pub mod supplier;
pub mod warranty;
