use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::deliveries::{
    DeliveryListResult, ListDeliveriesQuery, RecordDeliveryCommand,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{Delivery, Page};
use crate::domain::validation::{self, MAX_NAME_LEN};
use crate::storage::traits::DeliveryStorage;

const ENTITY: &str = "delivery";

/// Service for incoming stock. Recording a delivery restocks the catalog item.
#[derive(Clone)]
pub struct DeliveryService {
    deliveries: Arc<dyn DeliveryStorage>,
}

impl DeliveryService {
    pub fn new(deliveries: Arc<dyn DeliveryStorage>) -> Self {
        Self { deliveries }
    }

    pub async fn record_delivery(&self, command: RecordDeliveryCommand) -> FarmResult<Delivery> {
        info!(
            "Recording delivery of {} {} for {} {}",
            command.capacity, command.union, command.category, command.eatables_id
        );

        if command.capacity <= 0 {
            return Err(FarmError::validation("delivery capacity must be positive"));
        }

        let now = validation::now_rfc3339();
        let time = match validation::optional_text(command.time) {
            Some(time) => validation::timestamp("time", &time)?,
            None => now.clone(),
        };
        let delivery = Delivery {
            id: validation::new_id(),
            name: validation::required_text("name", &command.name, MAX_NAME_LEN)?,
            category: command.category,
            eatables_id: command.eatables_id,
            capacity: command.capacity,
            union: validation::required_text("union", &command.union, MAX_NAME_LEN)?,
            time,
            created_at: now.clone(),
            updated_at: now,
        };

        if !self.deliveries.record_delivery(&delivery).await? {
            warn!("Delivery target not found: {} {}", delivery.category, delivery.eatables_id);
            return Err(FarmError::not_found(
                delivery.category.as_str(),
                delivery.eatables_id,
            ));
        }

        info!("Recorded delivery {}", delivery.id);
        Ok(delivery)
    }

    pub async fn get_delivery(&self, delivery_id: &str) -> FarmResult<Delivery> {
        self.deliveries.get_delivery(delivery_id).await?.ok_or_else(|| {
            warn!("Delivery not found: {}", delivery_id);
            FarmError::not_found(ENTITY, delivery_id)
        })
    }

    /// Soft delete. Stock already added stays on the catalog item.
    pub async fn delete_delivery(&self, delivery_id: &str) -> FarmResult<()> {
        info!("Deleting delivery: {}", delivery_id);

        if !self.deliveries.delete_delivery(delivery_id).await? {
            return Err(FarmError::not_found(ENTITY, delivery_id));
        }
        Ok(())
    }

    pub async fn list_deliveries(&self, query: ListDeliveriesQuery) -> FarmResult<DeliveryListResult> {
        let page = Page::new(query.page, query.limit)?;
        let (deliveries, count) = self.deliveries.list_deliveries(page, &query.filter).await?;
        Ok(DeliveryListResult { deliveries, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DeliveryFilter, EatableCategory};
    use crate::storage::test_utils::TestFarm;
    use crate::storage::traits::CatalogStorage;

    fn delivery_of(eatables_id: &str, category: EatableCategory, capacity: i64) -> RecordDeliveryCommand {
        RecordDeliveryCommand {
            name: "spring restock".to_string(),
            category,
            eatables_id: eatables_id.to_string(),
            capacity,
            union: "kilogram".to_string(),
            time: Some("2024-03-01 06:00:00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_delivery_restocks_catalog_item() {
        let farm = TestFarm::new().await;
        let hay = farm.food("f1").await;
        let service = DeliveryService::new(farm.deliveries.clone());

        service
            .record_delivery(delivery_of(&hay.id, EatableCategory::Food, 40))
            .await
            .unwrap();

        let restocked = farm.catalog.get_item(EatableCategory::Food, &hay.id).await.unwrap().unwrap();
        assert_eq!(restocked.capacity, hay.capacity + 40);
    }

    #[tokio::test]
    async fn test_delivery_to_missing_item_stores_nothing() {
        let farm = TestFarm::new().await;
        let hay = farm.food("f1").await;
        let service = DeliveryService::new(farm.deliveries.clone());

        let wrong_category = service
            .record_delivery(delivery_of(&hay.id, EatableCategory::Drug, 40))
            .await;
        assert!(wrong_category.unwrap_err().is_not_found());

        let listed = service
            .list_deliveries(ListDeliveriesQuery {
                page: 1,
                limit: 10,
                filter: DeliveryFilter::default(),
            })
            .await
            .unwrap();
        assert_eq!(listed.count, 0);
    }

    #[tokio::test]
    async fn test_delivery_validation() {
        let farm = TestFarm::new().await;
        let hay = farm.food("f1").await;
        let service = DeliveryService::new(farm.deliveries.clone());

        let zero = service.record_delivery(delivery_of(&hay.id, EatableCategory::Food, 0)).await;
        assert!(matches!(zero, Err(FarmError::Validation(_))));

        let mut bad_time = delivery_of(&hay.id, EatableCategory::Food, 5);
        bad_time.time = Some("soon".to_string());
        let result = service.record_delivery(bad_time).await;
        assert!(matches!(result, Err(FarmError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_keeps_stock() {
        let farm = TestFarm::new().await;
        let hay = farm.food("f1").await;
        let service = DeliveryService::new(farm.deliveries.clone());
        let delivery = service
            .record_delivery(delivery_of(&hay.id, EatableCategory::Food, 10))
            .await
            .unwrap();

        service.delete_delivery(&delivery.id).await.unwrap();

        assert!(service.get_delivery(&delivery.id).await.unwrap_err().is_not_found());
        let item = farm.catalog.get_item(EatableCategory::Food, &hay.id).await.unwrap().unwrap();
        assert_eq!(item.capacity, hay.capacity + 10);
    }
}
