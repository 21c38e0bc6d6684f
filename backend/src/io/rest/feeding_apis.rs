//! # REST API for the Feeding Ledger

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::FeedingRequest;
use tracing::info;

use super::mappers::FeedingMapper;
use crate::AppState;

pub async fn log_feeding(
    State(state): State<AppState>,
    Json(request): Json<FeedingRequest>,
) -> impl IntoResponse {
    info!("POST /api/feedings - request: {:?}", request);

    let command = match FeedingMapper::to_log_command(request) {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };
    match state.feeding_service.log_feeding(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(FeedingMapper::to_dto(entry))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_feeding(
    State(state): State<AppState>,
    Path(feeding_id): Path<String>,
    Json(request): Json<FeedingRequest>,
) -> impl IntoResponse {
    info!("PUT /api/feedings/{} - request: {:?}", feeding_id, request);

    let command = match FeedingMapper::to_update_command(feeding_id, request) {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };
    match state.feeding_service.update_feeding(command).await {
        Ok(entry) => (StatusCode::OK, Json(FeedingMapper::to_dto(entry))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_feeding(
    State(state): State<AppState>,
    Path(feeding_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/feedings/{}", feeding_id);

    match state.feeding_service.delete_feeding(&feeding_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
