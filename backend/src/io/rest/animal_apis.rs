//! # REST API for Animals
//!
//! Animal CRUD, per-animal schedule and feeding listings, and the hungry
//! animals report.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateAnimalRequest, UpdateAnimalRequest};
use tracing::info;

use super::mappers::{AnimalMapper, FeedingMapper, ScheduleMapper};
use super::query::{required_page, AnimalListQuery, PageQuery};
use crate::domain::commands::animals::ListAnimalsQuery;
use crate::domain::commands::hunger::HungryAnimalsQuery;
use crate::domain::commands::schedules::AnimalEatablesQuery;
use crate::domain::models::{AnimalFilter, EatableCategory};
use crate::domain::validation::optional_text;
use crate::AppState;

/// Register a new animal
pub async fn create_animal(
    State(state): State<AppState>,
    Json(request): Json<CreateAnimalRequest>,
) -> impl IntoResponse {
    info!("POST /api/animals - request: {:?}", request);

    let command = AnimalMapper::to_create_command(request);
    match state.animal_service.create_animal(command).await {
        Ok(animal) => (StatusCode::CREATED, Json(AnimalMapper::to_dto(animal))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get an animal by ID
pub async fn get_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/animals/{}", animal_id);

    match state.animal_service.get_animal(&animal_id).await {
        Ok(animal) => (StatusCode::OK, Json(AnimalMapper::to_dto(animal))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace an animal's fields
pub async fn update_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    Json(request): Json<UpdateAnimalRequest>,
) -> impl IntoResponse {
    info!("PUT /api/animals/{} - request: {:?}", animal_id, request);

    let command = AnimalMapper::to_update_command(animal_id, request);
    match state.animal_service.update_animal(command).await {
        Ok(animal) => (StatusCode::OK, Json(AnimalMapper::to_dto(animal))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Soft-delete an animal
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/animals/{}", animal_id);

    match state.animal_service.delete_animal(&animal_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// List animals with optional filters
pub async fn list_animals(
    State(state): State<AppState>,
    Query(query): Query<AnimalListQuery>,
) -> impl IntoResponse {
    info!("GET /api/animals - query: {:?}", query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };
    let filter = AnimalFilter {
        category: optional_text(query.category),
        genus: optional_text(query.genus),
        gender: optional_text(query.gender),
        is_health: query.is_health,
        weight: query.weight,
    };

    match state
        .animal_service
        .list_animals(ListAnimalsQuery { page, limit, filter })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(AnimalMapper::to_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Animals whose logged feedings lag their schedule
pub async fn hungry_animals(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    info!("GET /api/animals/hungry - query: {:?}", query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };

    match state
        .hunger_service
        .hungry_animals(HungryAnimalsQuery { page, limit })
        .await
    {
        Ok(report) => (StatusCode::OK, Json(AnimalMapper::to_hunger_dto(report))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Foods scheduled for an animal
pub async fn list_animal_foods(
    state: State<AppState>,
    animal_id: Path<String>,
    query: Query<PageQuery>,
) -> impl IntoResponse {
    list_animal_eatables(state, animal_id, query, EatableCategory::Food).await
}

/// Drugs scheduled for an animal
pub async fn list_animal_drugs(
    state: State<AppState>,
    animal_id: Path<String>,
    query: Query<PageQuery>,
) -> impl IntoResponse {
    list_animal_eatables(state, animal_id, query, EatableCategory::Drug).await
}

async fn list_animal_eatables(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    Query(query): Query<PageQuery>,
    category: EatableCategory,
) -> axum::response::Response {
    info!("GET /api/animals/{}/{}s - query: {:?}", animal_id, category, query);

    let (page, limit) = match required_page(query.page, query.limit) {
        Ok(window) => window,
        Err(e) => return e.into_response(),
    };
    let query = AnimalEatablesQuery {
        animal_id,
        category,
        page,
        limit,
    };

    match state.schedule_service.list_for_animal(query).await {
        Ok(result) => (StatusCode::OK, Json(ScheduleMapper::to_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Every feeding logged for an animal, newest day first
pub async fn list_animal_feedings(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/animals/{}/feedings", animal_id);

    match state.feeding_service.list_for_animal(&animal_id).await {
        Ok(result) => (StatusCode::OK, Json(FeedingMapper::to_list_dto(result))).into_response(),
        Err(e) => e.into_response(),
    }
}
