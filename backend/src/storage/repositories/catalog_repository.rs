use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::{deletion_mark, parse_category, push_like, to_count};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{CatalogFilter, CatalogItem, EatableCategory, Page};
use crate::storage::connection::DbConnection;
use crate::storage::traits::CatalogStorage;

const CATALOG_COLUMNS: &str = "id, category, name, status, capacity, product_union, description, \
                               created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CatalogRow {
    id: String,
    category: String,
    name: String,
    status: Option<String>,
    capacity: i64,
    product_union: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<CatalogRow> for CatalogItem {
    type Error = FarmError;

    fn try_from(row: CatalogRow) -> FarmResult<Self> {
        Ok(CatalogItem {
            id: row.id,
            category: parse_category(row.category)?,
            name: row.name,
            status: row.status,
            capacity: row.capacity,
            union: row.product_union,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for foods and drugs
#[derive(Clone)]
pub struct CatalogRepository {
    db: DbConnection,
}

impl CatalogRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn push_filters(
        query: &mut QueryBuilder<'_, Sqlite>,
        category: EatableCategory,
        filter: &CatalogFilter,
    ) {
        query
            .push(" WHERE deleted_at IS NULL AND category = ")
            .push_bind(category.as_str());
        if let Some(name) = &filter.name {
            push_like(query, "name", name);
        }
        if let Some(union) = &filter.union {
            push_like(query, "product_union", union);
        }
        if let Some(status) = &filter.status {
            push_like(query, "status", status);
        }
    }
}

#[async_trait]
impl CatalogStorage for CatalogRepository {
    async fn store_item(&self, item: &CatalogItem) -> FarmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO eatables (id, category, name, status, capacity, product_union,
                                  description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(item.category.as_str())
        .bind(&item.name)
        .bind(&item.status)
        .bind(item.capacity)
        .bind(&item.union)
        .bind(&item.description)
        .bind(&item.created_at)
        .bind(&item.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_item(&self, category: EatableCategory, item_id: &str) -> FarmResult<Option<CatalogItem>> {
        let row = sqlx::query_as::<_, CatalogRow>(&format!(
            "SELECT {CATALOG_COLUMNS} FROM eatables \
             WHERE id = ? AND category = ? AND deleted_at IS NULL"
        ))
        .bind(item_id)
        .bind(category.as_str())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(CatalogItem::try_from).transpose()
    }

    async fn find_by_name(&self, category: EatableCategory, name: &str) -> FarmResult<Option<CatalogItem>> {
        let row = sqlx::query_as::<_, CatalogRow>(&format!(
            "SELECT {CATALOG_COLUMNS} FROM eatables \
             WHERE name = ? AND category = ? AND deleted_at IS NULL LIMIT 1"
        ))
        .bind(name)
        .bind(category.as_str())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(CatalogItem::try_from).transpose()
    }

    async fn update_item(&self, item: &CatalogItem) -> FarmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE eatables
            SET name = ?, status = ?, capacity = ?, product_union = ?, description = ?,
                updated_at = ?
            WHERE id = ? AND category = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&item.name)
        .bind(&item.status)
        .bind(item.capacity)
        .bind(&item.union)
        .bind(&item.description)
        .bind(&item.updated_at)
        .bind(&item.id)
        .bind(item.category.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_item(&self, category: EatableCategory, item_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE eatables SET deleted_at = ? WHERE id = ? AND category = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(item_id)
        .bind(category.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_items(
        &self,
        category: EatableCategory,
        page: Page,
        filter: &CatalogFilter,
    ) -> FarmResult<(Vec<CatalogItem>, u64)> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {CATALOG_COLUMNS} FROM eatables"));
        Self::push_filters(&mut query, category, filter);
        query
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<CatalogRow>()
            .fetch_all(self.db.pool())
            .await?;
        let items = rows
            .into_iter()
            .map(CatalogItem::try_from)
            .collect::<FarmResult<Vec<_>>>()?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM eatables");
        Self::push_filters(&mut count_query, category, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        Ok((items, to_count(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: EatableCategory, name: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            category,
            name: name.to_string(),
            status: (category == EatableCategory::Drug).then(|| "available".to_string()),
            capacity: 10,
            union: "kilogram".to_string(),
            description: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    async fn setup_test() -> CatalogRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        CatalogRepository::new(db)
    }

    #[tokio::test]
    async fn test_foods_and_drugs_are_kept_apart() {
        let repo = setup_test().await;
        repo.store_item(&item("f1", EatableCategory::Food, "Hay")).await.unwrap();
        repo.store_item(&item("d1", EatableCategory::Drug, "Vaccine")).await.unwrap();

        assert!(repo.get_item(EatableCategory::Food, "f1").await.unwrap().is_some());
        assert!(repo.get_item(EatableCategory::Drug, "f1").await.unwrap().is_none());

        let (foods, total) = repo
            .list_items(EatableCategory::Food, Page::new(1, 10).unwrap(), &CatalogFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(foods[0].name, "Hay");
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_deleted_items() {
        let repo = setup_test().await;
        repo.store_item(&item("f1", EatableCategory::Food, "Hay")).await.unwrap();

        assert!(repo.find_by_name(EatableCategory::Food, "Hay").await.unwrap().is_some());
        assert!(repo.delete_item(EatableCategory::Food, "f1").await.unwrap());
        assert!(repo.find_by_name(EatableCategory::Food, "Hay").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let repo = setup_test().await;
        repo.store_item(&item("d1", EatableCategory::Drug, "Vaccine")).await.unwrap();
        let mut expired = item("d2", EatableCategory::Drug, "Old vaccine");
        expired.status = Some("expired".to_string());
        repo.store_item(&expired).await.unwrap();

        let filter = CatalogFilter {
            status: Some("EXPIRED".to_string()),
            ..Default::default()
        };
        let (drugs, total) = repo
            .list_items(EatableCategory::Drug, Page::new(1, 10).unwrap(), &filter)
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(drugs[0].id, "d2");
    }

    #[tokio::test]
    async fn test_name_filter_matches_wildcards_literally() {
        let repo = setup_test().await;
        repo.store_item(&item("f1", EatableCategory::Food, "Hay")).await.unwrap();
        repo.store_item(&item("f2", EatableCategory::Food, "Oats_50%")).await.unwrap();
        let page = Page::new(1, 10).unwrap();

        let underscore = CatalogFilter {
            name: Some("_".to_string()),
            ..Default::default()
        };
        let (foods, total) = repo.list_items(EatableCategory::Food, page, &underscore).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(foods[0].id, "f2");

        let percent = CatalogFilter {
            name: Some("%".to_string()),
            ..Default::default()
        };
        let (foods, _) = repo.list_items(EatableCategory::Food, page, &percent).await.unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].id, "f2");
    }
}
