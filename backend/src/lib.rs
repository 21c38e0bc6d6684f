//! # Farm Backend
//!
//! Farm-management API: animals, the food and drug catalog, products and
//! animal yields, deliveries, feeding schedules, the feeding ledger, and the
//! hunger report that reconciles schedules against the ledger.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (services, hunger detector)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::FarmConfig;
use crate::domain::{
    AnimalProductService, AnimalService, CatalogService, DeliveryService, EatableReferences,
    FeedingService, HungerPolicy, HungerService, ProductService, ScheduleService,
};
use crate::storage::{
    AnimalProductRepository, AnimalRepository, CatalogRepository, DbConnection,
    DeliveryRepository, LedgerRepository, ProductRepository, ScheduleRepository,
};

pub use io::rest::create_router;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub app_name: Arc<str>,
    pub environment: Arc<str>,
    pub animal_service: AnimalService,
    pub catalog_service: CatalogService,
    pub product_service: ProductService,
    pub animal_product_service: AnimalProductService,
    pub delivery_service: DeliveryService,
    pub schedule_service: ScheduleService,
    pub feeding_service: FeedingService,
    pub hunger_service: HungerService,
}

impl AppState {
    /// Wire every service onto one database connection
    pub fn new(db: DbConnection, config: &FarmConfig) -> Self {
        let animals = Arc::new(AnimalRepository::new(db.clone()));
        let catalog = Arc::new(CatalogRepository::new(db.clone()));
        let schedules = Arc::new(ScheduleRepository::new(db.clone()));
        let products = Arc::new(ProductRepository::new(db.clone()));
        let ledger = Arc::new(LedgerRepository::new(db.clone()));
        let references = EatableReferences::new(animals.clone(), catalog.clone());

        Self {
            app_name: Arc::from(config.app.as_str()),
            environment: Arc::from(config.environment.as_str()),
            animal_service: AnimalService::new(animals.clone()),
            catalog_service: CatalogService::new(catalog),
            product_service: ProductService::new(products.clone()),
            animal_product_service: AnimalProductService::new(
                Arc::new(AnimalProductRepository::new(db.clone())),
                animals.clone(),
                products,
            ),
            delivery_service: DeliveryService::new(Arc::new(DeliveryRepository::new(db))),
            schedule_service: ScheduleService::new(schedules.clone(), references.clone()),
            feeding_service: FeedingService::new(ledger.clone(), references),
            hunger_service: HungerService::new(
                schedules,
                ledger,
                animals,
                HungerPolicy {
                    deduplicate: config.hunger_deduplicate,
                },
                config.context_timeout,
            ),
        }
    }
}

/// Open the database and build the application state
pub async fn initialize_backend(config: &FarmConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database.url);
    let db = DbConnection::new(&config.database).await?;

    info!("Setting up application state");
    Ok(AppState::new(db, config))
}

/// Application state over an isolated in-memory database
#[cfg(test)]
pub async fn initialize_test_backend(config: &FarmConfig) -> Result<AppState> {
    let db = DbConnection::init_test().await?;
    Ok(AppState::new(db, config))
}
