use serde::{Deserialize, Serialize};

/// Represents an animal on the farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub category_name: String,
    pub gender: String,
    pub birth_day: Option<String>, // YYYY-MM-DD
    pub genus: Option<String>,
    pub weight: u32,
    pub is_health: bool,
    pub description: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for registering a new animal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAnimalRequest {
    pub name: String,
    pub category_name: String,
    pub gender: String,
    #[serde(default)]
    pub birth_day: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub weight: u32,
    pub is_health: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request for replacing an animal's fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateAnimalRequest {
    pub name: String,
    pub category_name: String,
    pub gender: String,
    #[serde(default)]
    pub birth_day: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub weight: u32,
    pub is_health: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of animals. `count` is the total number of matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalListResponse {
    pub animals: Vec<Animal>,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EatableCategory {
    Food,
    Drug,
}

/// Represents a food in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    /// Running stock counter, increased by deliveries
    pub capacity: i64,
    pub union: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a food
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodRequest {
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
    pub union: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodListResponse {
    pub foods: Vec<Food>,
    pub count: u64,
}

/// Represents a drug in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drug {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub capacity: i64,
    pub union: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a drug
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugRequest {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub capacity: i64,
    pub union: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugListResponse {
    pub drugs: Vec<Drug>,
    pub count: u64,
}

/// Represents a farm product (milk, wool...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub union: String,
    pub total_capacity: i64,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRequest {
    pub name: String,
    pub union: String,
    #[serde(default)]
    pub total_capacity: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub count: u64,
}

/// A yield collected from an animal, with the animal and product names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalProduct {
    pub id: String,
    pub animal_id: String,
    pub animal_name: String,
    pub animal_category: String,
    pub product_id: String,
    pub product_name: String,
    pub union: String,
    pub capacity: i64,
    pub get_time: String, // YYYY-MM-DD HH:MM:SS
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for recording or correcting a yield
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalProductRequest {
    pub animal_id: String,
    pub product_id: String,
    #[serde(default)]
    pub capacity: i64,
    pub get_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalProductListResponse {
    pub animal_products: Vec<AnimalProduct>,
    pub count: u64,
}

/// A product with the total an animal gave of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductYield {
    pub product: Product,
    pub produced: i64,
}

/// An animal with the total it gave of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalYield {
    pub animal: Animal,
    pub produced: i64,
}

/// Products one animal gave. `count` is the number of distinct products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalProductsResponse {
    pub animal: Animal,
    pub products: Vec<ProductYield>,
    pub count: u64,
}

/// Animals that gave one product. `count` is the number of distinct animals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductAnimalsResponse {
    pub product: Product,
    pub animals: Vec<AnimalYield>,
    pub count: u64,
}

/// Stock delivered for a food or drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    pub name: String,
    pub category: EatableCategory,
    pub eatables_id: String,
    pub capacity: i64,
    pub union: String,
    pub time: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateDeliveryRequest {
    pub name: String,
    pub category: EatableCategory,
    pub eatables_id: String,
    pub capacity: i64,
    pub union: String,
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS`; defaults to now
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryListResponse {
    pub deliveries: Vec<Delivery>,
    pub count: u64,
}

/// One feeding slot: how much, at what time of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub capacity: i64,
    pub time: String, // HH:MM:SS
}

/// Catalog item embedded in a schedule response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EatableItem {
    pub id: String,
    pub category: EatableCategory,
    pub name: String,
    pub status: Option<String>,
    pub capacity: i64,
    pub union: String,
    pub description: Option<String>,
}

/// A feeding/medication plan assigned to an animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalEatable {
    pub id: String,
    pub animal_id: String,
    pub eatables_id: String,
    pub category: EatableCategory,
    pub daily: Vec<ScheduleSlot>,
    pub eatable: EatableItem,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or replacing a schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalEatableRequest {
    pub animal_id: String,
    pub eatables_id: String,
    pub category: EatableCategory,
    pub daily: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalEatableListResponse {
    pub eatables: Vec<AnimalEatable>,
    pub count: u64,
}

/// Feedings actually given to an animal on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feeding {
    pub id: String,
    pub animal_id: String,
    pub eatables_id: String,
    pub category: EatableCategory,
    pub day: String, // YYYY-MM-DD
    pub daily: Vec<ScheduleSlot>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for logging or correcting a feeding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedingRequest {
    pub animal_id: String,
    pub eatables_id: String,
    pub category: EatableCategory,
    pub day: String,
    pub daily: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedingListResponse {
    pub feedings: Vec<Feeding>,
    pub count: u64,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub environment: String,
}
