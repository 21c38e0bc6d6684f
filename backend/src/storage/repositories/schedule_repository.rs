use async_trait::async_trait;

use super::{deletion_mark, parse_category, to_count};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{
    CatalogItem, EatableCategory, Page, ScheduleAssignment, ScheduleSlot, ScheduledEatable,
};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ScheduleStorage;

/// Live assignments joined to their live catalog item. The join also checks
/// the category so a food assignment never resolves to a drug row.
const SCHEDULE_SELECT: &str = r#"
    SELECT e.id, e.animal_id, e.eatables_id, e.category, e.daily, e.created_at, e.updated_at,
           c.name AS item_name, c.status AS item_status, c.capacity AS item_capacity,
           c.product_union AS item_union, c.description AS item_description,
           c.created_at AS item_created_at, c.updated_at AS item_updated_at
    FROM animal_eatable_info AS e
    JOIN eatables AS c ON c.id = e.eatables_id AND c.category = e.category
    WHERE e.deleted_at IS NULL AND c.deleted_at IS NULL
"#;

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: String,
    animal_id: String,
    eatables_id: String,
    category: String,
    daily: String,
    created_at: String,
    updated_at: String,
    item_name: String,
    item_status: Option<String>,
    item_capacity: i64,
    item_union: String,
    item_description: Option<String>,
    item_created_at: String,
    item_updated_at: String,
}

impl TryFrom<ScheduleRow> for ScheduledEatable {
    type Error = FarmError;

    fn try_from(row: ScheduleRow) -> FarmResult<Self> {
        let category = parse_category(row.category)?;
        let daily = ScheduleSlot::decode_list(&row.daily)?;

        Ok(ScheduledEatable {
            item: CatalogItem {
                id: row.eatables_id.clone(),
                category,
                name: row.item_name,
                status: row.item_status,
                capacity: row.item_capacity,
                union: row.item_union,
                description: row.item_description,
                created_at: row.item_created_at,
                updated_at: row.item_updated_at,
            },
            assignment: ScheduleAssignment {
                id: row.id,
                animal_id: row.animal_id,
                eatables_id: row.eatables_id,
                category,
                daily,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

/// Repository for schedule assignments
#[derive(Clone)]
pub struct ScheduleRepository {
    db: DbConnection,
}

impl ScheduleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleStorage for ScheduleRepository {
    async fn store_assignment(&self, assignment: &ScheduleAssignment) -> FarmResult<()> {
        let daily = ScheduleSlot::encode_list(&assignment.daily)?;

        sqlx::query(
            r#"
            INSERT INTO animal_eatable_info (id, animal_id, eatables_id, category, daily,
                                             created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&assignment.id)
        .bind(&assignment.animal_id)
        .bind(&assignment.eatables_id)
        .bind(assignment.category.as_str())
        .bind(daily)
        .bind(&assignment.created_at)
        .bind(&assignment.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_assignment(&self, assignment_id: &str) -> FarmResult<Option<ScheduledEatable>> {
        let row = sqlx::query_as::<_, ScheduleRow>(&format!("{SCHEDULE_SELECT} AND e.id = ?"))
            .bind(assignment_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.map(ScheduledEatable::try_from).transpose()
    }

    async fn update_assignment(&self, assignment: &ScheduleAssignment) -> FarmResult<bool> {
        let daily = ScheduleSlot::encode_list(&assignment.daily)?;

        let result = sqlx::query(
            r#"
            UPDATE animal_eatable_info
            SET animal_id = ?, eatables_id = ?, category = ?, daily = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&assignment.animal_id)
        .bind(&assignment.eatables_id)
        .bind(assignment.category.as_str())
        .bind(daily)
        .bind(&assignment.updated_at)
        .bind(&assignment.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_assignment(&self, assignment_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE animal_eatable_info SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(assignment_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_animal(
        &self,
        animal_id: &str,
        category: EatableCategory,
        page: Page,
    ) -> FarmResult<(Vec<ScheduledEatable>, u64)> {
        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            "{SCHEDULE_SELECT} AND e.animal_id = ? AND e.category = ? \
             ORDER BY e.created_at, e.id LIMIT ? OFFSET ?"
        ))
        .bind(animal_id)
        .bind(category.as_str())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db.pool())
        .await?;

        let assignments = rows
            .into_iter()
            .map(ScheduledEatable::try_from)
            .collect::<FarmResult<Vec<_>>>()?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM animal_eatable_info AS e
            JOIN eatables AS c ON c.id = e.eatables_id AND c.category = e.category
            WHERE e.deleted_at IS NULL AND c.deleted_at IS NULL
              AND e.animal_id = ? AND e.category = ?
            "#,
        )
        .bind(animal_id)
        .bind(category.as_str())
        .fetch_one(self.db.pool())
        .await?;

        Ok((assignments, to_count(total)))
    }

    async fn load_schedule_assignments(&self, page: Page) -> FarmResult<Vec<ScheduledEatable>> {
        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            "{SCHEDULE_SELECT} ORDER BY e.created_at, e.id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db.pool())
        .await?;

        // One undecodable row fails the whole page
        rows.into_iter().map(ScheduledEatable::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{slots, TestFarm};
    use crate::storage::traits::CatalogStorage;

    #[tokio::test]
    async fn test_second_page_starts_at_offset_limit() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;
        for i in 0..25 {
            farm.schedule(&format!("s{i:02}"), "a1", &hay, slots(&[("08:00:00", 1)]))
                .await;
        }

        let page = farm
            .schedules
            .load_schedule_assignments(Page::new(2, 10).unwrap())
            .await
            .unwrap();

        let ids: Vec<_> = page.iter().map(|s| s.assignment.id.clone()).collect();
        let expected: Vec<_> = (10..20).map(|i| format!("s{i:02}")).collect();
        assert_eq!(ids, expected);

        let last = farm
            .schedules
            .load_schedule_assignments(Page::new(3, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(last.len(), 5);
    }

    #[tokio::test]
    async fn test_page_embeds_catalog_item_for_foods_and_drugs() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;
        let vaccine = farm.drug("d1").await;
        farm.schedule("s1", "a1", &hay, slots(&[("08:00:00", 5)])).await;
        farm.schedule("s2", "a1", &vaccine, slots(&[("09:00:00", 1)])).await;

        let page = farm
            .schedules
            .load_schedule_assignments(Page::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].item, hay);
        assert_eq!(page[1].item, vaccine);
        assert_eq!(page[1].assignment.daily, slots(&[("09:00:00", 1)]));
    }

    #[tokio::test]
    async fn test_deleted_rows_and_deleted_catalog_items_are_skipped() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;
        let oats = farm.food("f2").await;
        farm.schedule("s1", "a1", &hay, slots(&[("08:00:00", 5)])).await;
        farm.schedule("s2", "a1", &oats, slots(&[("09:00:00", 5)])).await;
        farm.schedule("s3", "a1", &hay, slots(&[("10:00:00", 5)])).await;

        assert!(farm.schedules.delete_assignment("s1").await.unwrap());
        assert!(farm.catalog.delete_item(EatableCategory::Food, "f2").await.unwrap());

        let page = farm
            .schedules
            .load_schedule_assignments(Page::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].assignment.id, "s3");
        assert!(farm.schedules.get_assignment("s2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_slot_list_fails_the_whole_page() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;
        farm.schedule("s1", "a1", &hay, slots(&[("08:00:00", 5)])).await;
        farm.schedule("s2", "a1", &hay, slots(&[("09:00:00", 5)])).await;
        farm.corrupt_daily("animal_eatable_info", "s2", "[{\"capacity\":5,\"time\":\"nine\"}]")
            .await;

        let result = farm
            .schedules
            .load_schedule_assignments(Page::new(1, 10).unwrap())
            .await;

        assert!(matches!(result, Err(FarmError::Decode(_))));
    }

    #[tokio::test]
    async fn test_list_for_animal_splits_foods_and_drugs() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        farm.animal("a2").await;
        let hay = farm.food("f1").await;
        let vaccine = farm.drug("d1").await;
        farm.schedule("s1", "a1", &hay, slots(&[("08:00:00", 5)])).await;
        farm.schedule("s2", "a1", &vaccine, slots(&[("09:00:00", 1)])).await;
        farm.schedule("s3", "a2", &hay, slots(&[("10:00:00", 5)])).await;

        let (foods, total) = farm
            .schedules
            .list_for_animal("a1", EatableCategory::Food, Page::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(foods[0].assignment.id, "s1");
    }

    #[tokio::test]
    async fn test_update_replaces_whole_slot_list() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        let hay = farm.food("f1").await;
        let mut assignment = farm
            .schedule("s1", "a1", &hay, slots(&[("08:00:00", 5), ("18:00:00", 5)]))
            .await;

        assignment.daily = slots(&[("12:00:00", 7)]);
        assignment.updated_at = "2024-06-01T00:00:00Z".to_string();
        assert!(farm.schedules.update_assignment(&assignment).await.unwrap());

        let stored = farm.schedules.get_assignment("s1").await.unwrap().unwrap();
        assert_eq!(stored.assignment.daily, slots(&[("12:00:00", 7)]));
    }
}
