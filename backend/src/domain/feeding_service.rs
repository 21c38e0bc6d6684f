use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::feedings::{FeedingListResult, LogFeedingCommand, UpdateFeedingCommand};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{LedgerEntry, ScheduleSlot};
use crate::domain::schedule_service::EatableReferences;
use crate::domain::validation;
use crate::storage::traits::LedgerStorage;

const ENTITY: &str = "feeding";

/// Service for the feeding ledger: what was actually given, per day.
///
/// Logging a feeding never touches catalog stock.
#[derive(Clone)]
pub struct FeedingService {
    ledger: Arc<dyn LedgerStorage>,
    references: EatableReferences,
}

impl FeedingService {
    pub fn new(ledger: Arc<dyn LedgerStorage>, references: EatableReferences) -> Self {
        Self { ledger, references }
    }

    pub async fn log_feeding(&self, command: LogFeedingCommand) -> FarmResult<LedgerEntry> {
        info!(
            "Logging feeding of {} {} for animal {} on {}",
            command.category, command.eatables_id, command.animal_id, command.day
        );

        let day = validation::calendar_date("day", &command.day)?;
        ScheduleSlot::validate_list(&command.daily)?;
        let item = self
            .references
            .resolve(&command.animal_id, command.category, &command.eatables_id)
            .await?;

        let now = validation::now_rfc3339();
        let entry = LedgerEntry {
            id: validation::new_id(),
            animal_id: command.animal_id,
            eatables_id: item.id,
            category: item.category,
            day,
            daily: command.daily,
            created_at: now.clone(),
            updated_at: now,
        };
        self.ledger.store_entry(&entry).await?;
        Ok(entry)
    }

    pub async fn get_feeding(&self, feeding_id: &str) -> FarmResult<LedgerEntry> {
        self.ledger
            .get_entry(feeding_id)
            .await?
            .ok_or_else(|| FarmError::not_found(ENTITY, feeding_id))
    }

    pub async fn update_feeding(&self, command: UpdateFeedingCommand) -> FarmResult<LedgerEntry> {
        info!("Updating feeding: {}", command.feeding_id);

        let mut entry = self.get_feeding(&command.feeding_id).await?;
        let day = validation::calendar_date("day", &command.day)?;
        ScheduleSlot::validate_list(&command.daily)?;
        let item = self
            .references
            .resolve(&command.animal_id, command.category, &command.eatables_id)
            .await?;

        entry.animal_id = command.animal_id;
        entry.eatables_id = item.id;
        entry.category = item.category;
        entry.day = day;
        entry.daily = command.daily;
        entry.updated_at = validation::now_rfc3339();

        if !self.ledger.update_entry(&entry).await? {
            return Err(FarmError::not_found(ENTITY, entry.id));
        }
        Ok(entry)
    }

    pub async fn delete_feeding(&self, feeding_id: &str) -> FarmResult<()> {
        info!("Deleting feeding: {}", feeding_id);

        if !self.ledger.delete_entry(feeding_id).await? {
            warn!("Feeding not found for delete: {}", feeding_id);
            return Err(FarmError::not_found(ENTITY, feeding_id));
        }
        Ok(())
    }

    /// Every live ledger entry of the animal, newest day first
    pub async fn list_for_animal(&self, animal_id: &str) -> FarmResult<FeedingListResult> {
        self.references.require_animal(animal_id).await?;

        let feedings = self.ledger.load_ledger_entries(animal_id).await?;
        let count = feedings.len() as u64;
        Ok(FeedingListResult { feedings, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CatalogItem, EatableCategory};
    use crate::storage::test_utils::{slots, TestFarm};
    use crate::storage::traits::CatalogStorage;

    async fn setup() -> (TestFarm, FeedingService) {
        let farm = TestFarm::new().await;
        let references = EatableReferences::new(farm.animals.clone(), farm.catalog.clone());
        let service = FeedingService::new(farm.ledger.clone(), references);
        (farm, service)
    }

    fn log(item: &CatalogItem, day: &str, daily: Vec<ScheduleSlot>) -> LogFeedingCommand {
        LogFeedingCommand {
            animal_id: "a1".to_string(),
            eatables_id: item.id.clone(),
            category: item.category,
            day: day.to_string(),
            daily,
        }
    }

    #[tokio::test]
    async fn test_several_entries_per_day_are_kept() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;

        service.log_feeding(log(&hay, "2024-05-01", slots(&[("07:00:00", 3)]))).await.unwrap();
        service.log_feeding(log(&hay, "2024-05-01", slots(&[("19:00:00", 2)]))).await.unwrap();
        service.log_feeding(log(&hay, "2024-05-02", slots(&[("07:00:00", 3)]))).await.unwrap();

        let listed = service.list_for_animal("a1").await.unwrap();
        assert_eq!(listed.count, 3);
        assert_eq!(listed.feedings[0].day, "2024-05-02");
    }

    #[tokio::test]
    async fn test_logging_does_not_change_stock() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;

        service.log_feeding(log(&hay, "2024-05-01", slots(&[("07:00:00", 30)]))).await.unwrap();

        let item = farm.catalog.get_item(EatableCategory::Food, &hay.id).await.unwrap().unwrap();
        assert_eq!(item.capacity, hay.capacity);
    }

    #[tokio::test]
    async fn test_rejects_bad_day() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;

        let result = service.log_feeding(log(&hay, "May 1st", slots(&[("07:00:00", 3)]))).await;
        assert!(matches!(result, Err(FarmError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;
        let entry = service
            .log_feeding(log(&hay, "2024-05-01", slots(&[("07:00:00", 3)])))
            .await
            .unwrap();

        let updated = service
            .update_feeding(UpdateFeedingCommand {
                feeding_id: entry.id.clone(),
                animal_id: "a1".to_string(),
                eatables_id: hay.id.clone(),
                category: EatableCategory::Food,
                day: "2024-05-01".to_string(),
                daily: slots(&[("07:00:00", 3), ("12:00:00", 1)]),
            })
            .await
            .unwrap();
        assert_eq!(updated.daily.len(), 2);

        service.delete_feeding(&entry.id).await.unwrap();
        assert!(service.get_feeding(&entry.id).await.unwrap_err().is_not_found());
        assert_eq!(service.list_for_animal("a1").await.unwrap().count, 0);
    }
}
