//! Domain models for the farm.
//!
//! These types are storage- and transport-agnostic. Timestamps are kept as
//! RFC 3339 strings and calendar dates as `YYYY-MM-DD` strings, the same form
//! they take in the database and on the wire.

pub mod animal;
pub mod animal_product;
pub mod delivery;
pub mod eatable;
pub mod page;
pub mod product;
pub mod schedule;

pub use animal::{Animal, AnimalFilter};
pub use animal_product::{
    AnimalProduct, AnimalProductDetail, AnimalProductFilter, AnimalYield, ProductYield,
};
pub use delivery::{Delivery, DeliveryFilter};
pub use eatable::{CatalogFilter, CatalogItem, EatableCategory};
pub use page::Page;
pub use product::{Product, ProductFilter};
pub use schedule::{LedgerEntry, ScheduleAssignment, ScheduleSlot, ScheduledEatable, SlotTime};
