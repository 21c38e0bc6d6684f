//! Conversions between the `shared` DTOs and domain types.

pub mod animal_mapper;
pub mod animal_product_mapper;
pub mod catalog_mapper;
pub mod delivery_mapper;
pub mod feeding_mapper;
pub mod product_mapper;
pub mod schedule_mapper;

pub use animal_mapper::AnimalMapper;
pub use animal_product_mapper::AnimalProductMapper;
pub use catalog_mapper::CatalogMapper;
pub use delivery_mapper::DeliveryMapper;
pub use feeding_mapper::FeedingMapper;
pub use product_mapper::ProductMapper;
pub use schedule_mapper::{CategoryMapper, ScheduleMapper};
