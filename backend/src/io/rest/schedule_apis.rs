//! # REST API for Feeding Schedules
//!
//! Assigning foods and drugs to animals (`/api/eatables`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::AnimalEatableRequest;
use tracing::info;

use super::mappers::ScheduleMapper;
use crate::AppState;

pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<AnimalEatableRequest>,
) -> impl IntoResponse {
    info!("POST /api/eatables - request: {:?}", request);

    let command = match ScheduleMapper::to_assign_command(request) {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };
    match state.schedule_service.assign_eatable(command).await {
        Ok(scheduled) => (StatusCode::CREATED, Json(ScheduleMapper::to_dto(scheduled))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
    Json(request): Json<AnimalEatableRequest>,
) -> impl IntoResponse {
    info!("PUT /api/eatables/{} - request: {:?}", schedule_id, request);

    let command = match ScheduleMapper::to_update_command(schedule_id, request) {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };
    match state.schedule_service.update_assignment(command).await {
        Ok(scheduled) => (StatusCode::OK, Json(ScheduleMapper::to_dto(scheduled))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/eatables/{}", schedule_id);

    match state.schedule_service.delete_assignment(&schedule_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
