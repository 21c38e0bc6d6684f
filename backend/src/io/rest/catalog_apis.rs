//! # REST API for the Food and Drug Catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{DrugRequest, FoodRequest};
use tracing::info;

use super::mappers::CatalogMapper;
use super::query::{required_page, CatalogListQuery};
use crate::domain::commands::catalog::ListCatalogQuery;
use crate::domain::models::{CatalogFilter, EatableCategory};
use crate::domain::validation::optional_text;
use crate::AppState;

fn list_query(query: CatalogListQuery, category: EatableCategory) -> crate::domain::FarmResult<ListCatalogQuery> {
    let (page, limit) = required_page(query.page, query.limit)?;
    Ok(ListCatalogQuery {
        category,
        page,
        limit,
        filter: CatalogFilter {
            name: optional_text(query.name),
            union: optional_text(query.union),
            status: optional_text(query.status),
        },
    })
}

pub async fn create_food(
    State(state): State<AppState>,
    Json(request): Json<FoodRequest>,
) -> impl IntoResponse {
    info!("POST /api/foods - request: {:?}", request);

    match state
        .catalog_service
        .create_item(CatalogMapper::food_create_command(request))
        .await
    {
        Ok(item) => (StatusCode::CREATED, Json(CatalogMapper::to_food_dto(item))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/foods/{}", food_id);

    match state.catalog_service.get_item(EatableCategory::Food, &food_id).await {
        Ok(item) => (StatusCode::OK, Json(CatalogMapper::to_food_dto(item))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
    Json(request): Json<FoodRequest>,
) -> impl IntoResponse {
    info!("PUT /api/foods/{} - request: {:?}", food_id, request);

    match state
        .catalog_service
        .update_item(CatalogMapper::food_update_command(food_id, request))
        .await
    {
        Ok(item) => (StatusCode::OK, Json(CatalogMapper::to_food_dto(item))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/foods/{}", food_id);

    match state.catalog_service.delete_item(EatableCategory::Food, &food_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_foods(
    State(state): State<AppState>,
    Query(query): Query<CatalogListQuery>,
) -> impl IntoResponse {
    info!("GET /api/foods - query: {:?}", query);

    let query = match list_query(query, EatableCategory::Food) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    match state.catalog_service.list_items(query).await {
        Ok(result) => (StatusCode::OK, Json(CatalogMapper::to_food_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_drug(
    State(state): State<AppState>,
    Json(request): Json<DrugRequest>,
) -> impl IntoResponse {
    info!("POST /api/drugs - request: {:?}", request);

    match state
        .catalog_service
        .create_item(CatalogMapper::drug_create_command(request))
        .await
    {
        Ok(item) => (StatusCode::CREATED, Json(CatalogMapper::to_drug_dto(item))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_drug(
    State(state): State<AppState>,
    Path(drug_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/drugs/{}", drug_id);

    match state.catalog_service.get_item(EatableCategory::Drug, &drug_id).await {
        Ok(item) => (StatusCode::OK, Json(CatalogMapper::to_drug_dto(item))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_drug(
    State(state): State<AppState>,
    Path(drug_id): Path<String>,
    Json(request): Json<DrugRequest>,
) -> impl IntoResponse {
    info!("PUT /api/drugs/{} - request: {:?}", drug_id, request);

    match state
        .catalog_service
        .update_item(CatalogMapper::drug_update_command(drug_id, request))
        .await
    {
        Ok(item) => (StatusCode::OK, Json(CatalogMapper::to_drug_dto(item))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_drug(
    State(state): State<AppState>,
    Path(drug_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/drugs/{}", drug_id);

    match state.catalog_service.delete_item(EatableCategory::Drug, &drug_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_drugs(
    State(state): State<AppState>,
    Query(query): Query<CatalogListQuery>,
) -> impl IntoResponse {
    info!("GET /api/drugs - query: {:?}", query);

    let query = match list_query(query, EatableCategory::Drug) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    match state.catalog_service.list_items(query).await {
        Ok(result) => (StatusCode::OK, Json(CatalogMapper::to_drug_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}
