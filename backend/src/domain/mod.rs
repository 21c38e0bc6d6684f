//! # Domain Module
//!
//! Business rules for the farm: animal registry, the food and drug catalog,
//! products and the yields animals give, deliveries, feeding schedules, the
//! feeding ledger and the hunger detector that reconciles the last two.
//!
//! Services depend on the storage traits only. Each takes a command or query
//! from `commands` and returns domain models or a `FarmError`.

pub mod animal_product_service;
pub mod animal_service;
pub mod catalog_service;
pub mod commands;
pub mod delivery_service;
pub mod error;
pub mod feeding_service;
pub mod hunger;
pub mod models;
pub mod product_service;
pub mod schedule_service;
pub mod validation;

pub use animal_product_service::AnimalProductService;
pub use animal_service::AnimalService;
pub use catalog_service::CatalogService;
pub use delivery_service::DeliveryService;
pub use error::{FarmError, FarmResult};
pub use feeding_service::FeedingService;
pub use hunger::{HungerPolicy, HungerService};
pub use product_service::ProductService;
pub use schedule_service::{EatableReferences, ScheduleService};
