use super::schedule_mapper::CategoryMapper;
use crate::domain::commands::deliveries::{DeliveryListResult, RecordDeliveryCommand};
use crate::domain::models::Delivery as DomainDelivery;
use shared::{CreateDeliveryRequest, Delivery as SharedDelivery, DeliveryListResponse};

pub struct DeliveryMapper;

impl DeliveryMapper {
    pub fn to_dto(domain: DomainDelivery) -> SharedDelivery {
        SharedDelivery {
            id: domain.id,
            name: domain.name,
            category: CategoryMapper::to_dto(domain.category),
            eatables_id: domain.eatables_id,
            capacity: domain.capacity,
            union: domain.union,
            time: domain.time,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_record_command(request: CreateDeliveryRequest) -> RecordDeliveryCommand {
        RecordDeliveryCommand {
            name: request.name,
            category: CategoryMapper::to_domain(request.category),
            eatables_id: request.eatables_id,
            capacity: request.capacity,
            union: request.union,
            time: request.time,
        }
    }

    pub fn to_list_dto(result: DeliveryListResult) -> DeliveryListResponse {
        DeliveryListResponse {
            deliveries: result.deliveries.into_iter().map(Self::to_dto).collect(),
            count: result.count,
        }
    }
}
