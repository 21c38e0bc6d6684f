//! # REST API for Deliveries
//!
//! Recording a delivery restocks the referenced food or drug.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::CreateDeliveryRequest;
use tracing::info;

use super::mappers::{CategoryMapper, DeliveryMapper};
use super::query::{required_page, DeliveryListQuery};
use crate::domain::commands::deliveries::ListDeliveriesQuery;
use crate::domain::models::DeliveryFilter;
use crate::domain::validation::optional_text;
use crate::AppState;

pub async fn create_delivery(
    State(state): State<AppState>,
    Json(request): Json<CreateDeliveryRequest>,
) -> impl IntoResponse {
    info!("POST /api/deliveries - request: {:?}", request);

    match state
        .delivery_service
        .record_delivery(DeliveryMapper::to_record_command(request))
        .await
    {
        Ok(delivery) => (StatusCode::CREATED, Json(DeliveryMapper::to_dto(delivery))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_delivery(
    State(state): State<AppState>,
    Path(delivery_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/deliveries/{}", delivery_id);

    match state.delivery_service.get_delivery(&delivery_id).await {
        Ok(delivery) => (StatusCode::OK, Json(DeliveryMapper::to_dto(delivery))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_delivery(
    State(state): State<AppState>,
    Path(delivery_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/deliveries/{}", delivery_id);

    match state.delivery_service.delete_delivery(&delivery_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_deliveries(
    State(state): State<AppState>,
    Query(query): Query<DeliveryListQuery>,
) -> impl IntoResponse {
    info!("GET /api/deliveries - query: {:?}", query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };
    let filter = DeliveryFilter {
        name: optional_text(query.name),
        category: query.category.map(CategoryMapper::to_domain),
    };

    match state
        .delivery_service
        .list_deliveries(ListDeliveriesQuery { page, limit, filter })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(DeliveryMapper::to_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}
