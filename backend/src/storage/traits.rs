//! # Storage Traits
//!
//! Storage abstractions the domain services depend on. The SQLite
//! repositories in `repositories` implement them.
//!
//! Every read skips soft-deleted rows, and every delete is a soft delete.

use async_trait::async_trait;

use crate::domain::error::FarmResult;
use crate::domain::models::{
    Animal, AnimalFilter, AnimalProduct, AnimalProductDetail, AnimalProductFilter, AnimalYield,
    CatalogFilter, CatalogItem, Delivery, DeliveryFilter, EatableCategory, LedgerEntry, Page,
    Product, ProductFilter, ProductYield, ScheduleAssignment, ScheduledEatable,
};

#[async_trait]
pub trait AnimalStorage: Send + Sync {
    async fn store_animal(&self, animal: &Animal) -> FarmResult<()>;

    /// Returns `None` when the animal never existed or was soft-deleted
    async fn get_animal(&self, animal_id: &str) -> FarmResult<Option<Animal>>;

    /// Returns false when no live row matched
    async fn update_animal(&self, animal: &Animal) -> FarmResult<bool>;

    async fn delete_animal(&self, animal_id: &str) -> FarmResult<bool>;

    /// One page of matching animals plus the total number of matches
    async fn list_animals(&self, page: Page, filter: &AnimalFilter) -> FarmResult<(Vec<Animal>, u64)>;
}

/// Foods and drugs
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    async fn store_item(&self, item: &CatalogItem) -> FarmResult<()>;

    async fn get_item(&self, category: EatableCategory, item_id: &str) -> FarmResult<Option<CatalogItem>>;

    async fn find_by_name(&self, category: EatableCategory, name: &str) -> FarmResult<Option<CatalogItem>>;

    async fn update_item(&self, item: &CatalogItem) -> FarmResult<bool>;

    async fn delete_item(&self, category: EatableCategory, item_id: &str) -> FarmResult<bool>;

    async fn list_items(
        &self,
        category: EatableCategory,
        page: Page,
        filter: &CatalogFilter,
    ) -> FarmResult<(Vec<CatalogItem>, u64)>;
}

#[async_trait]
pub trait ProductStorage: Send + Sync {
    async fn store_product(&self, product: &Product) -> FarmResult<()>;

    async fn get_product(&self, product_id: &str) -> FarmResult<Option<Product>>;

    async fn find_by_name(&self, name: &str) -> FarmResult<Option<Product>>;

    async fn update_product(&self, product: &Product) -> FarmResult<bool>;

    async fn delete_product(&self, product_id: &str) -> FarmResult<bool>;

    async fn list_products(&self, page: Page, filter: &ProductFilter) -> FarmResult<(Vec<Product>, u64)>;
}

/// Yields collected from animals (`animal_products`)
#[async_trait]
pub trait AnimalProductStorage: Send + Sync {
    async fn store_animal_product(&self, record: &AnimalProduct) -> FarmResult<()>;

    /// `None` also when the yield's animal or product was soft-deleted
    async fn get_animal_product(&self, record_id: &str) -> FarmResult<Option<AnimalProductDetail>>;

    async fn update_animal_product(&self, record: &AnimalProduct) -> FarmResult<bool>;

    async fn delete_animal_product(&self, record_id: &str) -> FarmResult<bool>;

    async fn list_animal_products(
        &self,
        page: Page,
        filter: &AnimalProductFilter,
    ) -> FarmResult<(Vec<AnimalProductDetail>, u64)>;

    /// Products the animal gave, one row per product, plus the number of products
    async fn products_of_animal(&self, animal_id: &str, page: Page) -> FarmResult<(Vec<ProductYield>, u64)>;

    /// Animals that gave the product, one row per animal, plus the number of animals
    async fn animals_of_product(&self, product_id: &str, page: Page) -> FarmResult<(Vec<AnimalYield>, u64)>;
}

#[async_trait]
pub trait DeliveryStorage: Send + Sync {
    /// Store the delivery and add its capacity to the referenced catalog
    /// item atomically. Returns false (and stores nothing) when the catalog
    /// item is missing.
    async fn record_delivery(&self, delivery: &Delivery) -> FarmResult<bool>;

    async fn get_delivery(&self, delivery_id: &str) -> FarmResult<Option<Delivery>>;

    async fn delete_delivery(&self, delivery_id: &str) -> FarmResult<bool>;

    async fn list_deliveries(&self, page: Page, filter: &DeliveryFilter) -> FarmResult<(Vec<Delivery>, u64)>;
}

/// Schedule assignments (`animal_eatable_info`)
#[async_trait]
pub trait ScheduleStorage: Send + Sync {
    async fn store_assignment(&self, assignment: &ScheduleAssignment) -> FarmResult<()>;

    async fn get_assignment(&self, assignment_id: &str) -> FarmResult<Option<ScheduledEatable>>;

    /// Replaces the whole slot list
    async fn update_assignment(&self, assignment: &ScheduleAssignment) -> FarmResult<bool>;

    async fn delete_assignment(&self, assignment_id: &str) -> FarmResult<bool>;

    /// One page of an animal's assignments of the given category plus their total
    async fn list_for_animal(
        &self,
        animal_id: &str,
        category: EatableCategory,
        page: Page,
    ) -> FarmResult<(Vec<ScheduledEatable>, u64)>;

    /// One page of all live assignments whose catalog item is also live.
    /// A malformed slot list in any row fails the whole page.
    async fn load_schedule_assignments(&self, page: Page) -> FarmResult<Vec<ScheduledEatable>>;
}

/// Feeding ledger (`animal_given_eatables`)
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    async fn store_entry(&self, entry: &LedgerEntry) -> FarmResult<()>;

    async fn get_entry(&self, entry_id: &str) -> FarmResult<Option<LedgerEntry>>;

    async fn update_entry(&self, entry: &LedgerEntry) -> FarmResult<bool>;

    async fn delete_entry(&self, entry_id: &str) -> FarmResult<bool>;

    /// Every live ledger row of the animal across all days, newest day first
    async fn load_ledger_entries(&self, animal_id: &str) -> FarmResult<Vec<LedgerEntry>>;
}
