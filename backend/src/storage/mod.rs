//! # Storage Module
//!
//! Data persistence for the farm: SQLite through SQLx.
//!
//! - **connection**: pool ownership and schema setup
//! - **traits**: storage abstractions the domain layer depends on
//! - **repositories**: SQLite implementations of those traits
//!
//! Rows are never physically removed. Deleting sets `deleted_at`, and every
//! query ignores rows where it is set.

pub mod connection;
pub mod repositories;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use connection::DbConnection;
pub use repositories::{
    AnimalProductRepository, AnimalRepository, CatalogRepository, DeliveryRepository,
    LedgerRepository, ProductRepository, ScheduleRepository,
};
pub use traits::{
    AnimalProductStorage, AnimalStorage, CatalogStorage, DeliveryStorage, LedgerStorage,
    ProductStorage, ScheduleStorage,
};
