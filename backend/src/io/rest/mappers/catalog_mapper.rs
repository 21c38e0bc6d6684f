use crate::domain::commands::catalog::{
    CatalogListResult, CreateCatalogItemCommand, UpdateCatalogItemCommand,
};
use crate::domain::models::{CatalogItem, EatableCategory};
use shared::{Drug, DrugListResponse, DrugRequest, Food, FoodListResponse, FoodRequest};

/// Mapper between catalog items and the separate food and drug DTOs.
pub struct CatalogMapper;

impl CatalogMapper {
    pub fn to_food_dto(item: CatalogItem) -> Food {
        Food {
            id: item.id,
            name: item.name,
            capacity: item.capacity,
            union: item.union,
            description: item.description,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }

    pub fn to_drug_dto(item: CatalogItem) -> Drug {
        Drug {
            id: item.id,
            name: item.name,
            status: item.status,
            capacity: item.capacity,
            union: item.union,
            description: item.description,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }

    pub fn food_create_command(request: FoodRequest) -> CreateCatalogItemCommand {
        CreateCatalogItemCommand {
            category: EatableCategory::Food,
            name: request.name,
            status: None,
            capacity: request.capacity,
            union: request.union,
            description: request.description,
        }
    }

    pub fn food_update_command(item_id: String, request: FoodRequest) -> UpdateCatalogItemCommand {
        UpdateCatalogItemCommand {
            category: EatableCategory::Food,
            item_id,
            name: request.name,
            status: None,
            capacity: request.capacity,
            union: request.union,
            description: request.description,
        }
    }

    pub fn drug_create_command(request: DrugRequest) -> CreateCatalogItemCommand {
        CreateCatalogItemCommand {
            category: EatableCategory::Drug,
            name: request.name,
            status: request.status,
            capacity: request.capacity,
            union: request.union,
            description: request.description,
        }
    }

    pub fn drug_update_command(item_id: String, request: DrugRequest) -> UpdateCatalogItemCommand {
        UpdateCatalogItemCommand {
            category: EatableCategory::Drug,
            item_id,
            name: request.name,
            status: request.status,
            capacity: request.capacity,
            union: request.union,
            description: request.description,
        }
    }

    pub fn to_food_list_dto(result: CatalogListResult) -> FoodListResponse {
        FoodListResponse {
            foods: result.items.into_iter().map(Self::to_food_dto).collect(),
            count: result.count,
        }
    }

    pub fn to_drug_list_dto(result: CatalogListResult) -> DrugListResponse {
        DrugListResponse {
            drugs: result.items.into_iter().map(Self::to_drug_dto).collect(),
            count: result.count,
        }
    }
}
