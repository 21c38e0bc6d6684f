//! # REST API for Animal Products
//!
//! Yields collected from animals, plus the per-animal and per-product totals.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::AnimalProductRequest;
use tracing::info;

use super::mappers::AnimalProductMapper;
use super::query::{required_page, AnimalProductListQuery, PageQuery};
use crate::domain::commands::animal_products::ListYieldsQuery;
use crate::domain::models::AnimalProductFilter;
use crate::domain::validation::optional_text;
use crate::AppState;

pub async fn create_animal_product(
    State(state): State<AppState>,
    Json(request): Json<AnimalProductRequest>,
) -> impl IntoResponse {
    info!("POST /api/animal-products - request: {:?}", request);

    match state
        .animal_product_service
        .record_yield(AnimalProductMapper::to_record_command(request))
        .await
    {
        Ok(detail) => (StatusCode::CREATED, Json(AnimalProductMapper::to_dto(detail))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_animal_product(
    State(state): State<AppState>,
    Path(yield_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/animal-products/{}", yield_id);

    match state.animal_product_service.get_yield(&yield_id).await {
        Ok(detail) => (StatusCode::OK, Json(AnimalProductMapper::to_dto(detail))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_animal_product(
    State(state): State<AppState>,
    Path(yield_id): Path<String>,
    Json(request): Json<AnimalProductRequest>,
) -> impl IntoResponse {
    info!("PUT /api/animal-products/{} - request: {:?}", yield_id, request);

    match state
        .animal_product_service
        .update_yield(AnimalProductMapper::to_update_command(yield_id, request))
        .await
    {
        Ok(detail) => (StatusCode::OK, Json(AnimalProductMapper::to_dto(detail))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_animal_product(
    State(state): State<AppState>,
    Path(yield_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/animal-products/{}", yield_id);

    match state.animal_product_service.delete_yield(&yield_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_animal_products(
    State(state): State<AppState>,
    Query(query): Query<AnimalProductListQuery>,
) -> impl IntoResponse {
    info!("GET /api/animal-products - query: {:?}", query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };
    let filter = AnimalProductFilter {
        day: optional_text(query.day),
    };

    match state
        .animal_product_service
        .list_yields(ListYieldsQuery { page, limit, filter })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(AnimalProductMapper::to_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Products an animal gave, totalled per product
pub async fn list_products_of_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    info!("GET /api/animals/{}/products - query: {:?}", animal_id, query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };

    match state
        .animal_product_service
        .products_of_animal(&animal_id, page, limit)
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(AnimalProductMapper::to_animal_products_dto(result))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Animals that gave a product, totalled per animal
pub async fn list_animals_of_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    info!("GET /api/products/{}/animals - query: {:?}", product_id, query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };

    match state
        .animal_product_service
        .animals_of_product(&product_id, page, limit)
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(AnimalProductMapper::to_product_animals_dto(result))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
