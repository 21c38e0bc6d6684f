//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod animals {
    use crate::domain::models::{Animal, AnimalFilter};

    /// Input for registering a new animal.
    #[derive(Debug, Clone)]
    pub struct CreateAnimalCommand {
        pub name: String,
        pub category_name: String,
        pub gender: String,
        pub birth_day: Option<String>,
        pub genus: Option<String>,
        pub weight: u32,
        pub is_health: bool,
        pub description: Option<String>,
    }

    /// Input for replacing an animal's mutable fields.
    #[derive(Debug, Clone)]
    pub struct UpdateAnimalCommand {
        pub animal_id: String,
        pub name: String,
        pub category_name: String,
        pub gender: String,
        pub birth_day: Option<String>,
        pub genus: Option<String>,
        pub weight: u32,
        pub is_health: bool,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ListAnimalsQuery {
        pub page: u32,
        pub limit: u32,
        pub filter: AnimalFilter,
    }

    /// One page of animals. `count` is the number of matches across all pages.
    #[derive(Debug, Clone)]
    pub struct AnimalListResult {
        pub animals: Vec<Animal>,
        pub count: u64,
    }
}

pub mod catalog {
    use crate::domain::models::{CatalogFilter, CatalogItem, EatableCategory};

    #[derive(Debug, Clone)]
    pub struct CreateCatalogItemCommand {
        pub category: EatableCategory,
        pub name: String,
        pub status: Option<String>,
        pub capacity: i64,
        pub union: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateCatalogItemCommand {
        pub category: EatableCategory,
        pub item_id: String,
        pub name: String,
        pub status: Option<String>,
        pub capacity: i64,
        pub union: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ListCatalogQuery {
        pub category: EatableCategory,
        pub page: u32,
        pub limit: u32,
        pub filter: CatalogFilter,
    }

    #[derive(Debug, Clone)]
    pub struct CatalogListResult {
        pub items: Vec<CatalogItem>,
        pub count: u64,
    }
}

pub mod products {
    use crate::domain::models::{Product, ProductFilter};

    #[derive(Debug, Clone)]
    pub struct CreateProductCommand {
        pub name: String,
        pub union: String,
        pub total_capacity: i64,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateProductCommand {
        pub product_id: String,
        pub name: String,
        pub union: String,
        pub total_capacity: i64,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ListProductsQuery {
        pub page: u32,
        pub limit: u32,
        pub filter: ProductFilter,
    }

    #[derive(Debug, Clone)]
    pub struct ProductListResult {
        pub products: Vec<Product>,
        pub count: u64,
    }
}

pub mod animal_products {
    use crate::domain::models::{
        Animal, AnimalProductDetail, AnimalProductFilter, AnimalYield, Product, ProductYield,
    };

    /// Input for recording a yield collected from an animal.
    #[derive(Debug, Clone)]
    pub struct RecordYieldCommand {
        pub animal_id: String,
        pub product_id: String,
        pub capacity: i64,
        /// `YYYY-MM-DD HH:MM:SS`
        pub get_time: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateYieldCommand {
        pub yield_id: String,
        pub animal_id: String,
        pub product_id: String,
        pub capacity: i64,
        pub get_time: String,
    }

    #[derive(Debug, Clone)]
    pub struct ListYieldsQuery {
        pub page: u32,
        pub limit: u32,
        pub filter: AnimalProductFilter,
    }

    #[derive(Debug, Clone)]
    pub struct YieldListResult {
        pub yields: Vec<AnimalProductDetail>,
        pub count: u64,
    }

    /// Products one animal gave
    #[derive(Debug, Clone)]
    pub struct AnimalProductsResult {
        pub animal: Animal,
        pub products: Vec<ProductYield>,
        pub count: u64,
    }

    /// Animals that gave one product
    #[derive(Debug, Clone)]
    pub struct ProductAnimalsResult {
        pub product: Product,
        pub animals: Vec<AnimalYield>,
        pub count: u64,
    }
}

pub mod deliveries {
    use crate::domain::models::{Delivery, DeliveryFilter, EatableCategory};

    /// Input for recording incoming stock of a food or drug.
    #[derive(Debug, Clone)]
    pub struct RecordDeliveryCommand {
        pub name: String,
        pub category: EatableCategory,
        pub eatables_id: String,
        pub capacity: i64,
        pub union: String,
        /// Defaults to the current time when absent
        pub time: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ListDeliveriesQuery {
        pub page: u32,
        pub limit: u32,
        pub filter: DeliveryFilter,
    }

    #[derive(Debug, Clone)]
    pub struct DeliveryListResult {
        pub deliveries: Vec<Delivery>,
        pub count: u64,
    }
}

pub mod schedules {
    use crate::domain::models::{EatableCategory, ScheduleSlot, ScheduledEatable};

    /// Input for assigning a feeding/medication plan to an animal.
    #[derive(Debug, Clone)]
    pub struct AssignEatableCommand {
        pub animal_id: String,
        pub eatables_id: String,
        pub category: EatableCategory,
        pub daily: Vec<ScheduleSlot>,
    }

    /// Replaces the referenced item and the whole slot list.
    #[derive(Debug, Clone)]
    pub struct UpdateAssignmentCommand {
        pub assignment_id: String,
        pub animal_id: String,
        pub eatables_id: String,
        pub category: EatableCategory,
        pub daily: Vec<ScheduleSlot>,
    }

    /// An animal's assignments of one category.
    #[derive(Debug, Clone)]
    pub struct AnimalEatablesQuery {
        pub animal_id: String,
        pub category: EatableCategory,
        pub page: u32,
        pub limit: u32,
    }

    #[derive(Debug, Clone)]
    pub struct ScheduleListResult {
        pub assignments: Vec<ScheduledEatable>,
        pub count: u64,
    }
}

pub mod feedings {
    use crate::domain::models::{EatableCategory, LedgerEntry, ScheduleSlot};

    /// Input for logging feedings actually given on one day.
    #[derive(Debug, Clone)]
    pub struct LogFeedingCommand {
        pub animal_id: String,
        pub eatables_id: String,
        pub category: EatableCategory,
        pub day: String,
        pub daily: Vec<ScheduleSlot>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateFeedingCommand {
        pub feeding_id: String,
        pub animal_id: String,
        pub eatables_id: String,
        pub category: EatableCategory,
        pub day: String,
        pub daily: Vec<ScheduleSlot>,
    }

    #[derive(Debug, Clone)]
    pub struct FeedingListResult {
        pub feedings: Vec<LedgerEntry>,
        pub count: u64,
    }
}

pub mod hunger {
    use crate::domain::models::Animal;

    #[derive(Debug, Clone, Copy)]
    pub struct HungryAnimalsQuery {
        pub page: u32,
        pub limit: u32,
    }

    /// Flagged animals in flagging order. `count` always equals `animals.len()`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct HungerReport {
        pub animals: Vec<Animal>,
        pub count: u64,
    }
}
