//! Domain model for a stock delivery into the catalog.
use serde::{Deserialize, Serialize};

use super::eatable::EatableCategory;

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

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryFilter {
    pub name: Option<String>,
    pub category: Option<EatableCategory>,
}
