use crate::domain::commands::animals::{AnimalListResult, CreateAnimalCommand, UpdateAnimalCommand};
use crate::domain::commands::hunger::HungerReport;
use crate::domain::models::Animal as DomainAnimal;
use shared::{Animal as SharedAnimal, AnimalListResponse, CreateAnimalRequest, UpdateAnimalRequest};

/// Mapper to convert between shared Animal DTOs and domain Animal models.
pub struct AnimalMapper;

impl AnimalMapper {
    pub fn to_dto(domain: DomainAnimal) -> SharedAnimal {
        SharedAnimal {
            id: domain.id,
            name: domain.name,
            category_name: domain.category_name,
            gender: domain.gender,
            birth_day: domain.birth_day,
            genus: domain.genus,
            weight: domain.weight,
            is_health: domain.is_health,
            description: domain.description,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_create_command(request: CreateAnimalRequest) -> CreateAnimalCommand {
        CreateAnimalCommand {
            name: request.name,
            category_name: request.category_name,
            gender: request.gender,
            birth_day: request.birth_day,
            genus: request.genus,
            weight: request.weight,
            is_health: request.is_health,
            description: request.description,
        }
    }

    pub fn to_update_command(animal_id: String, request: UpdateAnimalRequest) -> UpdateAnimalCommand {
        UpdateAnimalCommand {
            animal_id,
            name: request.name,
            category_name: request.category_name,
            gender: request.gender,
            birth_day: request.birth_day,
            genus: request.genus,
            weight: request.weight,
            is_health: request.is_health,
            description: request.description,
        }
    }

    pub fn to_list_dto(result: AnimalListResult) -> AnimalListResponse {
        AnimalListResponse {
            animals: result.animals.into_iter().map(Self::to_dto).collect(),
            count: result.count,
        }
    }

    /// The hunger report has the same `{animals, count}` shape as a listing
    pub fn to_hunger_dto(report: HungerReport) -> AnimalListResponse {
        AnimalListResponse {
            animals: report.animals.into_iter().map(Self::to_dto).collect(),
            count: report.count,
        }
    }
}
