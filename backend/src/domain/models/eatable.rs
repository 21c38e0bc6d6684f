//! Catalog items an animal can be fed: foods and drugs.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::FarmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EatableCategory {
    Food,
    Drug,
}

impl EatableCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EatableCategory::Food => "food",
            EatableCategory::Drug => "drug",
        }
    }
}

impl fmt::Display for EatableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EatableCategory {
    type Err = FarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(EatableCategory::Food),
            "drug" => Ok(EatableCategory::Drug),
            other => Err(FarmError::validation(format!(
                "unknown eatable category: {other}"
            ))),
        }
    }
}

/// A food or drug record. `status` is only meaningful for drugs.
///
/// `capacity` is the running stock counter; deliveries increase it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub category: EatableCategory,
    pub name: String,
    pub status: Option<String>,
    pub capacity: i64,
    pub union: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub name: Option<String>,
    pub union: Option<String>,
    pub status: Option<String>,
}
