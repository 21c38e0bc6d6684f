//! Test fixtures: an in-memory farm database plus helpers that seed rows
//! directly through the repositories.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::domain::models::{
    Animal, AnimalProduct, CatalogItem, EatableCategory, LedgerEntry, Product, ScheduleAssignment,
    ScheduleSlot,
};
use crate::storage::repositories::{
    AnimalProductRepository, AnimalRepository, CatalogRepository, DeliveryRepository,
    LedgerRepository, ProductRepository, ScheduleRepository,
};
use crate::storage::traits::{
    AnimalProductStorage, AnimalStorage, CatalogStorage, LedgerStorage, ProductStorage,
    ScheduleStorage,
};
use crate::storage::DbConnection;

pub struct TestFarm {
    pub db: DbConnection,
    pub animals: Arc<AnimalRepository>,
    pub catalog: Arc<CatalogRepository>,
    pub products: Arc<ProductRepository>,
    pub deliveries: Arc<DeliveryRepository>,
    pub schedules: Arc<ScheduleRepository>,
    pub ledger: Arc<LedgerRepository>,
    pub yields: Arc<AnimalProductRepository>,
    clock: AtomicU32,
}

/// Build a slot list from `(time, capacity)` pairs
pub fn slots(pairs: &[(&str, i64)]) -> Vec<ScheduleSlot> {
    pairs
        .iter()
        .map(|(time, capacity)| ScheduleSlot {
            capacity: *capacity,
            time: time.parse().expect("test slot time must be HH:MM:SS"),
        })
        .collect()
}

impl TestFarm {
    pub async fn new() -> Self {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        Self {
            animals: Arc::new(AnimalRepository::new(db.clone())),
            catalog: Arc::new(CatalogRepository::new(db.clone())),
            products: Arc::new(ProductRepository::new(db.clone())),
            deliveries: Arc::new(DeliveryRepository::new(db.clone())),
            schedules: Arc::new(ScheduleRepository::new(db.clone())),
            ledger: Arc::new(LedgerRepository::new(db.clone())),
            yields: Arc::new(AnimalProductRepository::new(db.clone())),
            db,
            clock: AtomicU32::new(0),
        }
    }

    /// Strictly increasing timestamps so insertion order is the listing order
    fn tick(&self) -> String {
        let n = self.clock.fetch_add(1, Ordering::SeqCst);
        format!("2024-01-01T{:02}:{:02}:{:02}Z", n / 3600, (n / 60) % 60, n % 60)
    }

    pub async fn animal(&self, id: &str) -> Animal {
        let now = self.tick();
        let animal = Animal {
            id: id.to_string(),
            name: format!("animal {id}"),
            category_name: "cattle".to_string(),
            gender: "female".to_string(),
            birth_day: Some("2021-03-14".to_string()),
            genus: Some("bos".to_string()),
            weight: 350,
            is_health: true,
            description: None,
            created_at: now.clone(),
            updated_at: now,
        };
        self.animals.store_animal(&animal).await.expect("Failed to seed animal");
        animal
    }

    pub async fn eatable(&self, id: &str, category: EatableCategory) -> CatalogItem {
        let now = self.tick();
        let item = CatalogItem {
            id: id.to_string(),
            category,
            name: format!("{category} {id}"),
            status: (category == EatableCategory::Drug).then(|| "available".to_string()),
            capacity: 100,
            union: "kilogram".to_string(),
            description: None,
            created_at: now.clone(),
            updated_at: now,
        };
        self.catalog.store_item(&item).await.expect("Failed to seed catalog item");
        item
    }

    pub async fn food(&self, id: &str) -> CatalogItem {
        self.eatable(id, EatableCategory::Food).await
    }

    pub async fn drug(&self, id: &str) -> CatalogItem {
        self.eatable(id, EatableCategory::Drug).await
    }

    pub async fn product(&self, id: &str) -> Product {
        let now = self.tick();
        let product = Product {
            id: id.to_string(),
            name: format!("product {id}"),
            union: "litre".to_string(),
            total_capacity: 0,
            description: None,
            created_at: now.clone(),
            updated_at: now,
        };
        self.products.store_product(&product).await.expect("Failed to seed product");
        product
    }

    pub async fn animal_product(
        &self,
        id: &str,
        animal_id: &str,
        product_id: &str,
        capacity: i64,
        get_time: &str,
    ) -> AnimalProduct {
        let now = self.tick();
        let record = AnimalProduct {
            id: id.to_string(),
            animal_id: animal_id.to_string(),
            product_id: product_id.to_string(),
            capacity,
            get_time: get_time.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.yields
            .store_animal_product(&record)
            .await
            .expect("Failed to seed animal product");
        record
    }

    pub async fn schedule(
        &self,
        id: &str,
        animal_id: &str,
        item: &CatalogItem,
        daily: Vec<ScheduleSlot>,
    ) -> ScheduleAssignment {
        let now = self.tick();
        let assignment = ScheduleAssignment {
            id: id.to_string(),
            animal_id: animal_id.to_string(),
            eatables_id: item.id.clone(),
            category: item.category,
            daily,
            created_at: now.clone(),
            updated_at: now,
        };
        self.schedules
            .store_assignment(&assignment)
            .await
            .expect("Failed to seed schedule");
        assignment
    }

    pub async fn feeding(
        &self,
        id: &str,
        animal_id: &str,
        item: &CatalogItem,
        day: &str,
        daily: Vec<ScheduleSlot>,
    ) -> LedgerEntry {
        let now = self.tick();
        let entry = LedgerEntry {
            id: id.to_string(),
            animal_id: animal_id.to_string(),
            eatables_id: item.id.clone(),
            category: item.category,
            day: day.to_string(),
            daily,
            created_at: now.clone(),
            updated_at: now,
        };
        self.ledger.store_entry(&entry).await.expect("Failed to seed feeding");
        entry
    }

    /// Overwrite a stored `daily` column with raw text, bypassing encoding
    pub async fn corrupt_daily(&self, table: &str, id: &str, raw: &str) {
        sqlx::query(&format!("UPDATE {table} SET daily = ? WHERE id = ?"))
            .bind(raw)
            .bind(id)
            .execute(self.db.pool())
            .await
            .expect("Failed to corrupt daily column");
    }
}
