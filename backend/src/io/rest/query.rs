//! Query-string parameters of the list endpoints.
//!
//! `page` and `limit` are required on every list endpoint. They are declared
//! as options so a missing value becomes a JSON validation error.

use serde::Deserialize;

use crate::domain::error::{FarmError, FarmResult};

pub fn required_page(page: Option<u32>, limit: Option<u32>) -> FarmResult<(u32, u32)> {
    match (page, limit) {
        (Some(page), Some(limit)) => Ok((page, limit)),
        _ => Err(FarmError::validation("page and limit query parameters are required")),
    }
}

#[derive(Deserialize, Debug)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct AnimalListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub genus: Option<String>,
    pub gender: Option<String>,
    pub is_health: Option<bool>,
    pub weight: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct CatalogListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub union: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub union: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AnimalProductListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// `YYYY-MM-DD`
    pub day: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DeliveryListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub category: Option<shared::EatableCategory>,
}
