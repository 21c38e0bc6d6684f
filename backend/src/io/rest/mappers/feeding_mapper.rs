use super::schedule_mapper::{CategoryMapper, ScheduleMapper};
use crate::domain::commands::feedings::{FeedingListResult, LogFeedingCommand, UpdateFeedingCommand};
use crate::domain::error::FarmResult;
use crate::domain::models::LedgerEntry;
use shared::{Feeding, FeedingListResponse, FeedingRequest};

/// Mapper between feeding DTOs and ledger entries.
pub struct FeedingMapper;

impl FeedingMapper {
    pub fn to_log_command(request: FeedingRequest) -> FarmResult<LogFeedingCommand> {
        Ok(LogFeedingCommand {
            animal_id: request.animal_id,
            eatables_id: request.eatables_id,
            category: CategoryMapper::to_domain(request.category),
            day: request.day,
            daily: ScheduleMapper::slots_to_domain(request.daily)?,
        })
    }

    pub fn to_update_command(feeding_id: String, request: FeedingRequest) -> FarmResult<UpdateFeedingCommand> {
        Ok(UpdateFeedingCommand {
            feeding_id,
            animal_id: request.animal_id,
            eatables_id: request.eatables_id,
            category: CategoryMapper::to_domain(request.category),
            day: request.day,
            daily: ScheduleMapper::slots_to_domain(request.daily)?,
        })
    }

    pub fn to_dto(entry: LedgerEntry) -> Feeding {
        Feeding {
            id: entry.id,
            animal_id: entry.animal_id,
            eatables_id: entry.eatables_id,
            category: CategoryMapper::to_dto(entry.category),
            day: entry.day,
            daily: ScheduleMapper::slots_to_dto(entry.daily),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }

    pub fn to_list_dto(result: FeedingListResult) -> FeedingListResponse {
        FeedingListResponse {
            feedings: result.feedings.into_iter().map(Self::to_dto).collect(),
            count: result.count,
        }
    }
}
