use crate::domain::commands::animal_products::{
    AnimalProductsResult, ProductAnimalsResult, RecordYieldCommand, UpdateYieldCommand,
    YieldListResult,
};
use crate::domain::models::{AnimalProductDetail, AnimalYield, ProductYield};
use shared::{
    AnimalProduct as SharedAnimalProduct, AnimalProductListResponse, AnimalProductRequest,
    AnimalProductsResponse, AnimalYield as SharedAnimalYield, ProductAnimalsResponse,
    ProductYield as SharedProductYield,
};

use super::{AnimalMapper, ProductMapper};

pub struct AnimalProductMapper;

impl AnimalProductMapper {
    pub fn to_dto(detail: AnimalProductDetail) -> SharedAnimalProduct {
        let record = detail.record;
        SharedAnimalProduct {
            id: record.id,
            animal_id: record.animal_id,
            animal_name: detail.animal_name,
            animal_category: detail.animal_category,
            product_id: record.product_id,
            product_name: detail.product_name,
            union: detail.product_union,
            capacity: record.capacity,
            get_time: record.get_time,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn to_record_command(request: AnimalProductRequest) -> RecordYieldCommand {
        RecordYieldCommand {
            animal_id: request.animal_id,
            product_id: request.product_id,
            capacity: request.capacity,
            get_time: request.get_time,
        }
    }

    pub fn to_update_command(yield_id: String, request: AnimalProductRequest) -> UpdateYieldCommand {
        UpdateYieldCommand {
            yield_id,
            animal_id: request.animal_id,
            product_id: request.product_id,
            capacity: request.capacity,
            get_time: request.get_time,
        }
    }

    pub fn to_list_dto(result: YieldListResult) -> AnimalProductListResponse {
        AnimalProductListResponse {
            animal_products: result.yields.into_iter().map(Self::to_dto).collect(),
            count: result.count,
        }
    }

    pub fn to_animal_products_dto(result: AnimalProductsResult) -> AnimalProductsResponse {
        AnimalProductsResponse {
            animal: AnimalMapper::to_dto(result.animal),
            products: result
                .products
                .into_iter()
                .map(|ProductYield { product, produced }| SharedProductYield {
                    product: ProductMapper::to_dto(product),
                    produced,
                })
                .collect(),
            count: result.count,
        }
    }

    pub fn to_product_animals_dto(result: ProductAnimalsResult) -> ProductAnimalsResponse {
        ProductAnimalsResponse {
            product: ProductMapper::to_dto(result.product),
            animals: result
                .animals
                .into_iter()
                .map(|AnimalYield { animal, produced }| SharedAnimalYield {
                    animal: AnimalMapper::to_dto(animal),
                    produced,
                })
                .collect(),
            count: result.count,
        }
    }
}
