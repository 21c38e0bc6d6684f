//! # Hunger Detector
//!
//! Reconciles feeding schedules against the feeding ledger and reports the
//! animals whose logged feedings lag their schedule.
//!
//! One detection pass works on a single page of schedule assignments:
//!
//! 1. Every slot whose hour is strictly later than the current hour marks its
//!    animal as having an *upcoming* slot. Slots are visited in page order and
//!    a later qualifying slot overwrites an earlier one for the same animal
//!    (last write wins, not the maximum).
//! 2. For each animal with an upcoming slot, every slot of every ledger entry
//!    is compared: `upcoming_hour - logged_hour >= 1` counts as one lag.
//! 3. The animal id is emitted once per lagging slot, so an animal can be
//!    reported several times. [`HungerPolicy::deduplicate`] collapses that to
//!    one entry per animal.
//! 4. Ids are resolved to full animal records one at a time; a missing
//!    animal aborts the pass with `NotFound`.
//!
//! Any storage or decode failure aborts the whole pass. Nothing is written.

use chrono::{Local, Timelike};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::commands::hunger::{HungerReport, HungryAnimalsQuery};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{LedgerEntry, Page, ScheduledEatable, SlotTime};
use crate::domain::validation;
use crate::storage::traits::{AnimalStorage, LedgerStorage, ScheduleStorage};

/// Minimum hour difference between the upcoming slot and a logged slot
const LAG_THRESHOLD_HOURS: i64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HungerPolicy {
    /// List each flagged animal once instead of once per lagging slot
    pub deduplicate: bool,
}

/// Latest-visited slot later than `current_hour`, per animal.
pub fn upcoming_slots(
    assignments: &[ScheduledEatable],
    current_hour: u32,
) -> BTreeMap<String, SlotTime> {
    let mut upcoming = BTreeMap::new();
    for scheduled in assignments {
        for slot in &scheduled.assignment.daily {
            if slot.time.hour() > current_hour {
                // Last qualifying slot in page order wins
                upcoming.insert(scheduled.assignment.animal_id.clone(), slot.time);
            }
        }
    }
    upcoming
}

/// Number of logged slots at least one hour behind `upcoming`.
pub fn lagging_slot_count(upcoming: SlotTime, ledger: &[LedgerEntry]) -> usize {
    let upcoming_hour = i64::from(upcoming.hour());
    ledger
        .iter()
        .flat_map(|entry| entry.daily.iter())
        .filter(|slot| upcoming_hour - i64::from(slot.time.hour()) >= LAG_THRESHOLD_HOURS)
        .count()
}

/// Service running detection passes against storage
#[derive(Clone)]
pub struct HungerService {
    schedules: Arc<dyn ScheduleStorage>,
    ledger: Arc<dyn LedgerStorage>,
    animals: Arc<dyn AnimalStorage>,
    policy: HungerPolicy,
    timeout: Duration,
}

impl HungerService {
    pub fn new(
        schedules: Arc<dyn ScheduleStorage>,
        ledger: Arc<dyn LedgerStorage>,
        animals: Arc<dyn AnimalStorage>,
        policy: HungerPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            schedules,
            ledger,
            animals,
            policy,
            timeout,
        }
    }

    /// Detection pass at the local wall-clock hour
    pub async fn hungry_animals(&self, query: HungryAnimalsQuery) -> FarmResult<HungerReport> {
        self.hungry_animals_at(query, Local::now().hour()).await
    }

    pub async fn hungry_animals_at(
        &self,
        query: HungryAnimalsQuery,
        current_hour: u32,
    ) -> FarmResult<HungerReport> {
        info!(
            "Detecting hungry animals: page={}, limit={}, hour={}",
            query.page, query.limit, current_hour
        );

        let page = Page::new(query.page, query.limit)?;
        if current_hour > 23 {
            return Err(FarmError::validation(format!(
                "hour must be between 0 and 23, got {current_hour}"
            )));
        }

        let report = validation::with_deadline(self.timeout, self.detect(page, current_hour)).await?;

        info!("Found {} hungry animal entries", report.count);
        Ok(report)
    }

    async fn detect(&self, page: Page, current_hour: u32) -> FarmResult<HungerReport> {
        let assignments = self.schedules.load_schedule_assignments(page).await?;
        let upcoming = upcoming_slots(&assignments, current_hour);
        debug!(
            "{} assignments on page, {} animals with upcoming slots",
            assignments.len(),
            upcoming.len()
        );

        let mut flagged = Vec::new();
        for (animal_id, slot) in &upcoming {
            let ledger = self.ledger.load_ledger_entries(animal_id).await?;
            let lagging = lagging_slot_count(*slot, &ledger);
            debug!("Animal {} upcoming {} lagging slots {}", animal_id, slot, lagging);

            let times = if self.policy.deduplicate {
                lagging.min(1)
            } else {
                lagging
            };
            flagged.extend(std::iter::repeat(animal_id.as_str()).take(times));
        }

        let mut animals = Vec::with_capacity(flagged.len());
        for animal_id in flagged {
            let animal = self.animals.get_animal(animal_id).await?.ok_or_else(|| {
                warn!("Flagged animal not found: {}", animal_id);
                FarmError::not_found("animal", animal_id)
            })?;
            animals.push(animal);
        }

        let count = animals.len() as u64;
        Ok(HungerReport { animals, count })
    }
}
