use crate::domain::commands::products::{CreateProductCommand, ProductListResult, UpdateProductCommand};
use crate::domain::models::Product as DomainProduct;
use shared::{Product as SharedProduct, ProductListResponse, ProductRequest};

pub struct ProductMapper;

impl ProductMapper {
    pub fn to_dto(domain: DomainProduct) -> SharedProduct {
        SharedProduct {
            id: domain.id,
            name: domain.name,
            union: domain.union,
            total_capacity: domain.total_capacity,
            description: domain.description,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_create_command(request: ProductRequest) -> CreateProductCommand {
        CreateProductCommand {
            name: request.name,
            union: request.union,
            total_capacity: request.total_capacity,
            description: request.description,
        }
    }

    pub fn to_update_command(product_id: String, request: ProductRequest) -> UpdateProductCommand {
        UpdateProductCommand {
            product_id,
            name: request.name,
            union: request.union,
            total_capacity: request.total_capacity,
            description: request.description,
        }
    }

    pub fn to_list_dto(result: ProductListResult) -> ProductListResponse {
        ProductListResponse {
            products: result.products.into_iter().map(Self::to_dto).collect(),
            count: result.count,
        }
    }
}
