//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step mutations run
//! inside a single transaction.

pub mod counter_repo;
pub mod customer_repo;
pub mod dashboard_repo;
pub mod part_repo;
pub mod phone_repo;
pub mod repair_repo;
pub mod supplier_repo;
pub mod warranty_repo;

pub use counter_repo::CounterRepo;
pub use customer_repo::CustomerRepo;
pub use dashboard_repo::DashboardRepo;
pub use part_repo::PartRepo;
pub use phone_repo::{BrandRepo, PhoneModelRepo};
pub use repair_repo::{RepairRepo, TransitionStatusError};
pub use supplier_repo::SupplierRepo;
pub use warranty_repo::{StartReworkError, WarrantyRepo};
