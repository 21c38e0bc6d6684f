//! Yields: how much of a product an animal gave, and when.
use serde::{Deserialize, Serialize};

use super::animal::Animal;
use super::product::Product;

/// One collected yield (`animal_products`). `get_time` is `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalProduct {
    pub id: String,
    pub animal_id: String,
    pub product_id: String,
    pub capacity: i64,
    pub get_time: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A yield joined with the names of its live animal and product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalProductDetail {
    pub record: AnimalProduct,
    pub animal_name: String,
    pub animal_category: String,
    pub product_name: String,
    pub product_union: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimalProductFilter {
    /// Only yields collected on this `YYYY-MM-DD` day
    pub day: Option<String>,
}

/// A product an animal gave, with the summed capacity of its live yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductYield {
    pub product: Product,
    pub produced: i64,
}

/// An animal that gave a product, with the summed capacity of its live yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalYield {
    pub animal: Animal,
    pub produced: i64,
}
