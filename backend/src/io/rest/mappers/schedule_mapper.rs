use crate::domain::commands::schedules::{
    AssignEatableCommand, ScheduleListResult, UpdateAssignmentCommand,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{
    CatalogItem, EatableCategory as DomainCategory, ScheduleSlot as DomainSlot, ScheduledEatable,
};
use shared::{
    AnimalEatable, AnimalEatableListResponse, AnimalEatableRequest, EatableCategory as SharedCategory,
    EatableItem, ScheduleSlot as SharedSlot,
};

pub struct CategoryMapper;

impl CategoryMapper {
    pub fn to_domain(dto: SharedCategory) -> DomainCategory {
        match dto {
            SharedCategory::Food => DomainCategory::Food,
            SharedCategory::Drug => DomainCategory::Drug,
        }
    }

    pub fn to_dto(domain: DomainCategory) -> SharedCategory {
        match domain {
            DomainCategory::Food => SharedCategory::Food,
            DomainCategory::Drug => SharedCategory::Drug,
        }
    }
}

/// Mapper for schedule assignments and the slot lists they share with feedings.
pub struct ScheduleMapper;

impl ScheduleMapper {
    /// Slot times must be `HH:MM:SS`
    pub fn slots_to_domain(slots: Vec<SharedSlot>) -> FarmResult<Vec<DomainSlot>> {
        slots
            .into_iter()
            .map(|slot| {
                let time = slot.time.parse().map_err(|_| {
                    FarmError::validation(format!("slot time must be HH:MM:SS, got {:?}", slot.time))
                })?;
                Ok(DomainSlot {
                    capacity: slot.capacity,
                    time,
                })
            })
            .collect()
    }

    pub fn slots_to_dto(slots: Vec<DomainSlot>) -> Vec<SharedSlot> {
        slots
            .into_iter()
            .map(|slot| SharedSlot {
                capacity: slot.capacity,
                time: slot.time.to_string(),
            })
            .collect()
    }

    pub fn to_assign_command(request: AnimalEatableRequest) -> FarmResult<AssignEatableCommand> {
        Ok(AssignEatableCommand {
            animal_id: request.animal_id,
            eatables_id: request.eatables_id,
            category: CategoryMapper::to_domain(request.category),
            daily: Self::slots_to_domain(request.daily)?,
        })
    }

    pub fn to_update_command(
        assignment_id: String,
        request: AnimalEatableRequest,
    ) -> FarmResult<UpdateAssignmentCommand> {
        Ok(UpdateAssignmentCommand {
            assignment_id,
            animal_id: request.animal_id,
            eatables_id: request.eatables_id,
            category: CategoryMapper::to_domain(request.category),
            daily: Self::slots_to_domain(request.daily)?,
        })
    }

    pub fn to_dto(domain: ScheduledEatable) -> AnimalEatable {
        let ScheduledEatable { assignment, item } = domain;
        AnimalEatable {
            id: assignment.id,
            animal_id: assignment.animal_id,
            eatables_id: assignment.eatables_id,
            category: CategoryMapper::to_dto(assignment.category),
            daily: Self::slots_to_dto(assignment.daily),
            eatable: Self::item_to_dto(item),
            created_at: assignment.created_at,
            updated_at: assignment.updated_at,
        }
    }

    pub fn to_list_dto(result: ScheduleListResult) -> AnimalEatableListResponse {
        AnimalEatableListResponse {
            eatables: result.assignments.into_iter().map(Self::to_dto).collect(),
            count: result.count,
        }
    }

    fn item_to_dto(item: CatalogItem) -> EatableItem {
        EatableItem {
            id: item.id,
            category: CategoryMapper::to_dto(item.category),
            name: item.name,
            status: item.status,
            capacity: item.capacity,
            union: item.union,
            description: item.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_times_are_validated_and_normalised() {
        let slots = vec![SharedSlot {
            capacity: 3,
            time: "07:05:00".to_string(),
        }];
        let domain = ScheduleMapper::slots_to_domain(slots.clone()).unwrap();
        assert_eq!(domain[0].time.hour(), 7);
        assert_eq!(ScheduleMapper::slots_to_dto(domain), slots);

        let bad = vec![SharedSlot {
            capacity: 3,
            time: "7am".to_string(),
        }];
        assert!(matches!(
            ScheduleMapper::slots_to_domain(bad),
            Err(FarmError::Validation(_))
        ));
    }
}
