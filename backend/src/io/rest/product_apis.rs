//! # REST API for Farm Products

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::ProductRequest;
use tracing::info;

use super::mappers::ProductMapper;
use super::query::{required_page, ProductListQuery};
use crate::domain::commands::products::ListProductsQuery;
use crate::domain::models::ProductFilter;
use crate::domain::validation::optional_text;
use crate::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> impl IntoResponse {
    info!("POST /api/products - request: {:?}", request);

    match state
        .product_service
        .create_product(ProductMapper::to_create_command(request))
        .await
    {
        Ok(product) => (StatusCode::CREATED, Json(ProductMapper::to_dto(product))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/products/{}", product_id);

    match state.product_service.get_product(&product_id).await {
        Ok(product) => (StatusCode::OK, Json(ProductMapper::to_dto(product))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<ProductRequest>,
) -> impl IntoResponse {
    info!("PUT /api/products/{} - request: {:?}", product_id, request);

    match state
        .product_service
        .update_product(ProductMapper::to_update_command(product_id, request))
        .await
    {
        Ok(product) => (StatusCode::OK, Json(ProductMapper::to_dto(product))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/products/{}", product_id);

    match state.product_service.delete_product(&product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> impl IntoResponse {
    info!("GET /api/products - query: {:?}", query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };
    let filter = ProductFilter {
        name: optional_text(query.name),
        union: optional_text(query.union),
    };

    match state
        .product_service
        .list_products(ListProductsQuery { page, limit, filter })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(ProductMapper::to_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}
