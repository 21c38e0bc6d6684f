use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::schedules::{
    AnimalEatablesQuery, AssignEatableCommand, ScheduleListResult, UpdateAssignmentCommand,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{
    CatalogItem, EatableCategory, Page, ScheduleAssignment, ScheduleSlot, ScheduledEatable,
};
use crate::domain::validation;
use crate::storage::traits::{AnimalStorage, CatalogStorage, ScheduleStorage};

const ENTITY: &str = "schedule";

/// Checks shared by schedules and feedings: the animal is live and the item
/// is a live catalog entry of the stated category.
#[derive(Clone)]
pub struct EatableReferences {
    animals: Arc<dyn AnimalStorage>,
    catalog: Arc<dyn CatalogStorage>,
}

impl EatableReferences {
    pub fn new(animals: Arc<dyn AnimalStorage>, catalog: Arc<dyn CatalogStorage>) -> Self {
        Self { animals, catalog }
    }

    pub async fn require_animal(&self, animal_id: &str) -> FarmResult<()> {
        if self.animals.get_animal(animal_id).await?.is_none() {
            warn!("Animal not found: {}", animal_id);
            return Err(FarmError::not_found("animal", animal_id));
        }
        Ok(())
    }

    pub async fn resolve(
        &self,
        animal_id: &str,
        category: EatableCategory,
        eatables_id: &str,
    ) -> FarmResult<CatalogItem> {
        self.require_animal(animal_id).await?;
        self.catalog
            .get_item(category, eatables_id)
            .await?
            .ok_or_else(|| {
                warn!("{} not found: {}", category, eatables_id);
                FarmError::not_found(category.as_str(), eatables_id)
            })
    }
}

/// Service for feeding/medication plans (schedule assignments)
#[derive(Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn ScheduleStorage>,
    references: EatableReferences,
}

impl ScheduleService {
    pub fn new(schedules: Arc<dyn ScheduleStorage>, references: EatableReferences) -> Self {
        Self {
            schedules,
            references,
        }
    }

    pub async fn assign_eatable(&self, command: AssignEatableCommand) -> FarmResult<ScheduledEatable> {
        info!(
            "Assigning {} {} to animal {} ({} slots)",
            command.category,
            command.eatables_id,
            command.animal_id,
            command.daily.len()
        );

        ScheduleSlot::validate_list(&command.daily)?;
        let item = self
            .references
            .resolve(&command.animal_id, command.category, &command.eatables_id)
            .await?;

        let now = validation::now_rfc3339();
        let assignment = ScheduleAssignment {
            id: validation::new_id(),
            animal_id: command.animal_id,
            eatables_id: item.id.clone(),
            category: item.category,
            daily: command.daily,
            created_at: now.clone(),
            updated_at: now,
        };
        self.schedules.store_assignment(&assignment).await?;

        info!("Created schedule {}", assignment.id);
        Ok(ScheduledEatable { assignment, item })
    }

    pub async fn get_assignment(&self, assignment_id: &str) -> FarmResult<ScheduledEatable> {
        self.schedules
            .get_assignment(assignment_id)
            .await?
            .ok_or_else(|| FarmError::not_found(ENTITY, assignment_id))
    }

    /// Replaces the referenced item and the whole slot list
    pub async fn update_assignment(
        &self,
        command: UpdateAssignmentCommand,
    ) -> FarmResult<ScheduledEatable> {
        info!("Updating schedule: {}", command.assignment_id);

        let mut assignment = self.get_assignment(&command.assignment_id).await?.assignment;
        ScheduleSlot::validate_list(&command.daily)?;
        let item = self
            .references
            .resolve(&command.animal_id, command.category, &command.eatables_id)
            .await?;

        assignment.animal_id = command.animal_id;
        assignment.eatables_id = item.id.clone();
        assignment.category = item.category;
        assignment.daily = command.daily;
        assignment.updated_at = validation::now_rfc3339();

        if !self.schedules.update_assignment(&assignment).await? {
            return Err(FarmError::not_found(ENTITY, assignment.id));
        }
        Ok(ScheduledEatable { assignment, item })
    }

    pub async fn delete_assignment(&self, assignment_id: &str) -> FarmResult<()> {
        info!("Deleting schedule: {}", assignment_id);

        if !self.schedules.delete_assignment(assignment_id).await? {
            warn!("Schedule not found for delete: {}", assignment_id);
            return Err(FarmError::not_found(ENTITY, assignment_id));
        }
        Ok(())
    }

    /// Foods or drugs assigned to one animal
    pub async fn list_for_animal(&self, query: AnimalEatablesQuery) -> FarmResult<ScheduleListResult> {
        let page = Page::new(query.page, query.limit)?;
        self.references.require_animal(&query.animal_id).await?;

        let (assignments, count) = self
            .schedules
            .list_for_animal(&query.animal_id, query.category, page)
            .await?;
        Ok(ScheduleListResult { assignments, count })
    }

    /// One page of every live assignment across all animals
    pub async fn load_schedule_assignments(
        &self,
        page: u32,
        limit: u32,
    ) -> FarmResult<Vec<ScheduledEatable>> {
        let page = Page::new(page, limit)?;
        self.schedules.load_schedule_assignments(page).await
    }
}
