use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::animals::{
    AnimalListResult, CreateAnimalCommand, ListAnimalsQuery, UpdateAnimalCommand,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{Animal, Page};
use crate::domain::validation::{self, MAX_NAME_LEN};
use crate::storage::traits::AnimalStorage;

const ENTITY: &str = "animal";

/// Service for registering and looking up farm animals
#[derive(Clone)]
pub struct AnimalService {
    animals: Arc<dyn AnimalStorage>,
}

impl AnimalService {
    pub fn new(animals: Arc<dyn AnimalStorage>) -> Self {
        Self { animals }
    }

    pub async fn create_animal(&self, command: CreateAnimalCommand) -> FarmResult<Animal> {
        info!("Creating animal: name={}, category={}", command.name, command.category_name);

        let now = validation::now_rfc3339();
        let animal = Animal {
            id: validation::new_id(),
            name: validation::required_text("name", &command.name, MAX_NAME_LEN)?,
            category_name: validation::required_text("category", &command.category_name, MAX_NAME_LEN)?,
            gender: validation::required_text("gender", &command.gender, MAX_NAME_LEN)?,
            birth_day: Self::birth_day(command.birth_day)?,
            genus: validation::optional_text(command.genus),
            weight: command.weight,
            is_health: command.is_health,
            description: validation::optional_text(command.description),
            created_at: now.clone(),
            updated_at: now,
        };

        self.animals.store_animal(&animal).await?;

        info!("Created animal: {} with ID: {}", animal.name, animal.id);
        Ok(animal)
    }

    /// Resolve an id to a live animal. Soft-deleted and unknown ids are `NotFound`.
    pub async fn get_animal(&self, animal_id: &str) -> FarmResult<Animal> {
        match self.animals.get_animal(animal_id).await? {
            Some(animal) => Ok(animal),
            None => {
                warn!("Animal not found: {}", animal_id);
                Err(FarmError::not_found(ENTITY, animal_id))
            }
        }
    }

    pub async fn update_animal(&self, command: UpdateAnimalCommand) -> FarmResult<Animal> {
        info!("Updating animal: {}", command.animal_id);

        let mut animal = self.get_animal(&command.animal_id).await?;
        animal.name = validation::required_text("name", &command.name, MAX_NAME_LEN)?;
        animal.category_name =
            validation::required_text("category", &command.category_name, MAX_NAME_LEN)?;
        animal.gender = validation::required_text("gender", &command.gender, MAX_NAME_LEN)?;
        animal.birth_day = Self::birth_day(command.birth_day)?;
        animal.genus = validation::optional_text(command.genus);
        animal.weight = command.weight;
        animal.is_health = command.is_health;
        animal.description = validation::optional_text(command.description);
        animal.updated_at = validation::now_rfc3339();

        if !self.animals.update_animal(&animal).await? {
            warn!("Animal disappeared during update: {}", animal.id);
            return Err(FarmError::not_found(ENTITY, animal.id));
        }

        Ok(animal)
    }

    pub async fn delete_animal(&self, animal_id: &str) -> FarmResult<()> {
        info!("Deleting animal: {}", animal_id);

        if !self.animals.delete_animal(animal_id).await? {
            warn!("Animal not found for delete: {}", animal_id);
            return Err(FarmError::not_found(ENTITY, animal_id));
        }
        Ok(())
    }

    pub async fn list_animals(&self, query: ListAnimalsQuery) -> FarmResult<AnimalListResult> {
        let page = Page::new(query.page, query.limit)?;
        let (animals, count) = self.animals.list_animals(page, &query.filter).await?;

        info!("Found {} animals ({} total)", animals.len(), count);
        Ok(AnimalListResult { animals, count })
    }

    fn birth_day(value: Option<String>) -> FarmResult<Option<String>> {
        validation::optional_text(value)
            .map(|day| validation::calendar_date("birth_day", &day))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AnimalFilter;
    use crate::storage::test_utils::TestFarm;

    fn create_command(name: &str, weight: u32) -> CreateAnimalCommand {
        CreateAnimalCommand {
            name: name.to_string(),
            category_name: "Cattle".to_string(),
            gender: "female".to_string(),
            birth_day: Some("2020-04-01".to_string()),
            genus: Some("Holstein".to_string()),
            weight,
            is_health: true,
            description: None,
        }
    }

    async fn setup() -> AnimalService {
        let farm = TestFarm::new().await;
        AnimalService::new(farm.animals)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = setup().await;

        let created = service.create_animal(create_command("  Daisy ", 420)).await.unwrap();
        assert_eq!(created.name, "Daisy");
        assert!(uuid::Uuid::parse_str(&created.id).is_ok());

        let fetched = service.get_animal(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let service = setup().await;

        let result = service.create_animal(create_command("", 100)).await;
        assert!(matches!(result, Err(FarmError::Validation(_))));

        let mut command = create_command("Bella", 100);
        command.birth_day = Some("14.03.2021".to_string());
        let result = service.create_animal(command).await;
        assert!(matches!(result, Err(FarmError::Validation(_))));
    }

    #[tokio::test]
    async fn test_deleted_animal_is_not_found() {
        let service = setup().await;
        let created = service.create_animal(create_command("Daisy", 420)).await.unwrap();

        service.delete_animal(&created.id).await.unwrap();

        assert!(service.get_animal(&created.id).await.unwrap_err().is_not_found());
        assert!(service.delete_animal(&created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = setup().await;
        let created = service.create_animal(create_command("Daisy", 420)).await.unwrap();

        let updated = service
            .update_animal(UpdateAnimalCommand {
                animal_id: created.id.clone(),
                name: "Daisy II".to_string(),
                category_name: "Cattle".to_string(),
                gender: "female".to_string(),
                birth_day: None,
                genus: None,
                weight: 450,
                is_health: false,
                description: Some("limping".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.weight, 450);
        assert_eq!(updated.birth_day, None);
        assert_eq!(service.get_animal(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_list_counts_all_matches() {
        let service = setup().await;
        for i in 0..3 {
            service.create_animal(create_command(&format!("cow {i}"), 400)).await.unwrap();
        }

        let result = service
            .list_animals(ListAnimalsQuery {
                page: 1,
                limit: 2,
                filter: AnimalFilter::default(),
            })
            .await
            .unwrap();
        assert_eq!(result.animals.len(), 2);
        assert_eq!(result.count, 3);

        let invalid = service
            .list_animals(ListAnimalsQuery {
                page: 0,
                limit: 2,
                filter: AnimalFilter::default(),
            })
            .await;
        assert!(matches!(invalid, Err(FarmError::Validation(_))));
    }
}
