use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::catalog::{
    CatalogListResult, CreateCatalogItemCommand, ListCatalogQuery, UpdateCatalogItemCommand,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{CatalogItem, EatableCategory, Page};
use crate::domain::validation::{self, MAX_NAME_LEN};
use crate::storage::traits::CatalogStorage;

/// Service for the food and drug catalog
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStorage>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStorage>) -> Self {
        Self { catalog }
    }

    pub async fn create_item(&self, command: CreateCatalogItemCommand) -> FarmResult<CatalogItem> {
        info!("Creating {}: name={}", command.category, command.name);

        let name = validation::required_text("name", &command.name, MAX_NAME_LEN)?;
        self.ensure_unique_name(command.category, &name, None).await?;

        let now = validation::now_rfc3339();
        let item = CatalogItem {
            id: validation::new_id(),
            category: command.category,
            name,
            status: Self::status(command.category, command.status),
            capacity: validation::non_negative("capacity", command.capacity)?,
            union: validation::required_text("union", &command.union, MAX_NAME_LEN)?,
            description: validation::optional_text(command.description),
            created_at: now.clone(),
            updated_at: now,
        };

        self.catalog.store_item(&item).await?;

        info!("Created {}: {} with ID: {}", item.category, item.name, item.id);
        Ok(item)
    }

    pub async fn get_item(&self, category: EatableCategory, item_id: &str) -> FarmResult<CatalogItem> {
        match self.catalog.get_item(category, item_id).await? {
            Some(item) => Ok(item),
            None => {
                warn!("{} not found: {}", category, item_id);
                Err(FarmError::not_found(category.as_str(), item_id))
            }
        }
    }

    pub async fn update_item(&self, command: UpdateCatalogItemCommand) -> FarmResult<CatalogItem> {
        info!("Updating {}: {}", command.category, command.item_id);

        let mut item = self.get_item(command.category, &command.item_id).await?;
        let name = validation::required_text("name", &command.name, MAX_NAME_LEN)?;
        self.ensure_unique_name(command.category, &name, Some(&item.id)).await?;

        item.name = name;
        item.status = Self::status(command.category, command.status);
        item.capacity = validation::non_negative("capacity", command.capacity)?;
        item.union = validation::required_text("union", &command.union, MAX_NAME_LEN)?;
        item.description = validation::optional_text(command.description);
        item.updated_at = validation::now_rfc3339();

        if !self.catalog.update_item(&item).await? {
            return Err(FarmError::not_found(item.category.as_str(), item.id));
        }
        Ok(item)
    }

    pub async fn delete_item(&self, category: EatableCategory, item_id: &str) -> FarmResult<()> {
        info!("Deleting {}: {}", category, item_id);

        if !self.catalog.delete_item(category, item_id).await? {
            warn!("{} not found for delete: {}", category, item_id);
            return Err(FarmError::not_found(category.as_str(), item_id));
        }
        Ok(())
    }

    pub async fn list_items(&self, query: ListCatalogQuery) -> FarmResult<CatalogListResult> {
        let page = Page::new(query.page, query.limit)?;
        let (items, count) = self
            .catalog
            .list_items(query.category, page, &query.filter)
            .await?;

        info!("Found {} {} items ({} total)", items.len(), query.category, count);
        Ok(CatalogListResult { items, count })
    }

    async fn ensure_unique_name(
        &self,
        category: EatableCategory,
        name: &str,
        current_id: Option<&str>,
    ) -> FarmResult<()> {
        match self.catalog.find_by_name(category, name).await? {
            Some(existing) if Some(existing.id.as_str()) != current_id => Err(FarmError::Conflict(
                format!("{category} named {name:?} already exists"),
            )),
            _ => Ok(()),
        }
    }

    /// Foods carry no status
    fn status(category: EatableCategory, status: Option<String>) -> Option<String> {
        match category {
            EatableCategory::Food => None,
            EatableCategory::Drug => validation::optional_text(status),
        }
    }
}
