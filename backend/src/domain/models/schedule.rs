//! Feeding schedules and the ledger of feedings actually given.
//!
//! Both share the slot shape `{capacity, time}`. A slot list is an owned
//! value on its parent row and is persisted as a single JSON array.

use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::eatable::{CatalogItem, EatableCategory};
use crate::domain::error::{FarmError, FarmResult};

const SLOT_TIME_FORMAT: &str = "%H:%M:%S";

/// Wall-clock time of day, always rendered as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(SlotTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SLOT_TIME_FORMAT))
    }
}

impl FromStr for SlotTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, SLOT_TIME_FORMAT).map(SlotTime)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| de::Error::custom(format!("invalid slot time {raw:?}: {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub capacity: i64,
    pub time: SlotTime,
}

impl ScheduleSlot {
    /// Encode a slot list into the JSON text stored in the `daily` column.
    pub fn encode_list(slots: &[ScheduleSlot]) -> FarmResult<String> {
        Ok(serde_json::to_string(slots)?)
    }

    /// Decode the `daily` column. Malformed data is a hard error.
    pub fn decode_list(raw: &str) -> FarmResult<Vec<ScheduleSlot>> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn validate_list(slots: &[ScheduleSlot]) -> FarmResult<()> {
        if slots.is_empty() {
            return Err(FarmError::validation("daily slot list cannot be empty"));
        }
        if slots.iter().any(|slot| slot.capacity < 0) {
            return Err(FarmError::validation("slot capacity cannot be negative"));
        }
        Ok(())
    }
}

/// A feeding/medication plan for one animal and one catalog item
/// (`animal_eatable_info`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    pub id: String,
    pub animal_id: String,
    pub eatables_id: String,
    pub category: EatableCategory,
    pub daily: Vec<ScheduleSlot>,
    pub created_at: String,
    pub updated_at: String,
}

/// A schedule assignment joined with the catalog item it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEatable {
    pub assignment: ScheduleAssignment,
    pub item: CatalogItem,
}

/// Feedings actually administered on one day (`animal_given_eatables`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub animal_id: String,
    pub eatables_id: String,
    pub category: EatableCategory,
    pub day: String, // YYYY-MM-DD
    pub daily: Vec<ScheduleSlot>,
    pub created_at: String,
    pub updated_at: String,
}
