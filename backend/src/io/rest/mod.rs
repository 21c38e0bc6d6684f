//! # REST API Interface Layer
//!
//! HTTP endpoints for the farm under `/api`. This layer only translates:
//! query strings and JSON bodies become domain commands through the mappers,
//! and `FarmError` becomes a status code plus `{"error": ...}` body.
//!
//! Every request runs under the configured deadline (`CONTEXT_TIMEOUT`).

pub mod animal_apis;
pub mod animal_product_apis;
pub mod catalog_apis;
pub mod delivery_apis;
pub mod error;
pub mod feeding_apis;
pub mod mappers;
pub mod product_apis;
pub mod query;
pub mod schedule_apis;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use shared::HealthResponse;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::FarmConfig;
use crate::domain::error::FarmError;
use crate::AppState;

/// Build the application router with CORS, request tracing and the deadline
pub fn create_router(state: AppState, config: &FarmConfig) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route(
            "/animals",
            post(animal_apis::create_animal).get(animal_apis::list_animals),
        )
        .route("/animals/hungry", get(animal_apis::hungry_animals))
        .route(
            "/animals/:id",
            get(animal_apis::get_animal)
                .put(animal_apis::update_animal)
                .delete(animal_apis::delete_animal),
        )
        .route("/animals/:id/foods", get(animal_apis::list_animal_foods))
        .route("/animals/:id/drugs", get(animal_apis::list_animal_drugs))
        .route("/animals/:id/feedings", get(animal_apis::list_animal_feedings))
        .route(
            "/animals/:id/products",
            get(animal_product_apis::list_products_of_animal),
        )
        .route(
            "/foods",
            post(catalog_apis::create_food).get(catalog_apis::list_foods),
        )
        .route(
            "/foods/:id",
            get(catalog_apis::get_food)
                .put(catalog_apis::update_food)
                .delete(catalog_apis::delete_food),
        )
        .route(
            "/drugs",
            post(catalog_apis::create_drug).get(catalog_apis::list_drugs),
        )
        .route(
            "/drugs/:id",
            get(catalog_apis::get_drug)
                .put(catalog_apis::update_drug)
                .delete(catalog_apis::delete_drug),
        )
        .route(
            "/products",
            post(product_apis::create_product).get(product_apis::list_products),
        )
        .route(
            "/products/:id",
            get(product_apis::get_product)
                .put(product_apis::update_product)
                .delete(product_apis::delete_product),
        )
        .route(
            "/products/:id/animals",
            get(animal_product_apis::list_animals_of_product),
        )
        .route(
            "/animal-products",
            post(animal_product_apis::create_animal_product)
                .get(animal_product_apis::list_animal_products),
        )
        .route(
            "/animal-products/:id",
            get(animal_product_apis::get_animal_product)
                .put(animal_product_apis::update_animal_product)
                .delete(animal_product_apis::delete_animal_product),
        )
        .route(
            "/deliveries",
            post(delivery_apis::create_delivery).get(delivery_apis::list_deliveries),
        )
        .route(
            "/deliveries/:id",
            get(delivery_apis::get_delivery).delete(delivery_apis::delete_delivery),
        )
        .route("/eatables", post(schedule_apis::create_schedule))
        .route(
            "/eatables/:id",
            put(schedule_apis::update_schedule).delete(schedule_apis::delete_schedule),
        )
        .route("/feedings", post(feeding_apis::log_feeding))
        .route(
            "/feedings/:id",
            put(feeding_apis::update_feeding).delete(feeding_apis::delete_feeding),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            config.context_timeout,
            request_deadline,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.cors_allow_origin))
        .with_state(state)
}

fn cors_layer(allow_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if allow_origin == "*" {
        return cors.allow_origin(Any);
    }
    match allow_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!("Invalid CORS_ALLOW_ORIGIN {:?}, allowing any origin", allow_origin);
            cors.allow_origin(Any)
        }
    }
}

async fn request_deadline(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => FarmError::Timeout(limit).into_response(),
    }
}

/// Liveness check
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/health");

    Json(HealthResponse {
        status: "ok".to_string(),
        app: state.app_name.to_string(),
        environment: state.environment.to_string(),
    })
}
