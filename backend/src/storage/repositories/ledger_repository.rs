use async_trait::async_trait;

use super::{deletion_mark, parse_category};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{LedgerEntry, ScheduleSlot};
use crate::storage::connection::DbConnection;
use crate::storage::traits::LedgerStorage;

const LEDGER_COLUMNS: &str =
    "id, animal_id, eatables_id, category, day, daily, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct LedgerRow {
    id: String,
    animal_id: String,
    eatables_id: String,
    category: String,
    day: String,
    daily: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<LedgerRow> for LedgerEntry {
    type Error = FarmError;

    fn try_from(row: LedgerRow) -> FarmResult<Self> {
        Ok(LedgerEntry {
            id: row.id,
            animal_id: row.animal_id,
            eatables_id: row.eatables_id,
            category: parse_category(row.category)?,
            day: row.day,
            daily: ScheduleSlot::decode_list(&row.daily)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for the feeding ledger
#[derive(Clone)]
pub struct LedgerRepository {
    db: DbConnection,
}

impl LedgerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStorage for LedgerRepository {
    async fn store_entry(&self, entry: &LedgerEntry) -> FarmResult<()> {
        let daily = ScheduleSlot::encode_list(&entry.daily)?;

        sqlx::query(
            r#"
            INSERT INTO animal_given_eatables (id, animal_id, eatables_id, category, day, daily,
                                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.animal_id)
        .bind(&entry.eatables_id)
        .bind(entry.category.as_str())
        .bind(&entry.day)
        .bind(daily)
        .bind(&entry.created_at)
        .bind(&entry.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_entry(&self, entry_id: &str) -> FarmResult<Option<LedgerEntry>> {
        let row = sqlx::query_as::<_, LedgerRow>(&format!(
            "SELECT {LEDGER_COLUMNS} FROM animal_given_eatables WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(LedgerEntry::try_from).transpose()
    }

    async fn update_entry(&self, entry: &LedgerEntry) -> FarmResult<bool> {
        let daily = ScheduleSlot::encode_list(&entry.daily)?;

        let result = sqlx::query(
            r#"
            UPDATE animal_given_eatables
            SET animal_id = ?, eatables_id = ?, category = ?, day = ?, daily = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&entry.animal_id)
        .bind(&entry.eatables_id)
        .bind(entry.category.as_str())
        .bind(&entry.day)
        .bind(daily)
        .bind(&entry.updated_at)
        .bind(&entry.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entry(&self, entry_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE animal_given_eatables SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(entry_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_ledger_entries(&self, animal_id: &str) -> FarmResult<Vec<LedgerEntry>> {
        let rows = sqlx::query_as::<_, LedgerRow>(&format!(
            "SELECT {LEDGER_COLUMNS} FROM animal_given_eatables \
             WHERE animal_id = ? AND deleted_at IS NULL \
             ORDER BY day DESC, created_at DESC, id"
        ))
        .bind(animal_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter().map(LedgerEntry::try_from).collect()
    }
}
