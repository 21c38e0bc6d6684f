use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::animal_repository::AnimalRow;
use super::product_repository::ProductRow;
use super::{deletion_mark, to_count};
use crate::domain::error::FarmResult;
use crate::domain::models::{
    AnimalProduct, AnimalProductDetail, AnimalProductFilter, AnimalYield, Page, ProductYield,
};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AnimalProductStorage;

/// Live yields whose animal and product are live too
const YIELD_FROM: &str = r#"
    FROM animal_products AS ap
    JOIN animals AS a ON a.id = ap.animal_id
    JOIN products AS p ON p.id = ap.product_id
    WHERE ap.deleted_at IS NULL AND a.deleted_at IS NULL AND p.deleted_at IS NULL
"#;

const YIELD_COLUMNS: &str = r#"
    SELECT ap.id, ap.animal_id, ap.product_id, ap.capacity, ap.get_time,
           ap.created_at, ap.updated_at,
           a.name AS animal_name, a.category_name AS animal_category,
           p.name AS product_name, p.product_union AS product_union
"#;

#[derive(sqlx::FromRow)]
struct YieldRow {
    id: String,
    animal_id: String,
    product_id: String,
    capacity: i64,
    get_time: String,
    created_at: String,
    updated_at: String,
    animal_name: String,
    animal_category: String,
    product_name: String,
    product_union: String,
}

impl From<YieldRow> for AnimalProductDetail {
    fn from(row: YieldRow) -> Self {
        AnimalProductDetail {
            record: AnimalProduct {
                id: row.id,
                animal_id: row.animal_id,
                product_id: row.product_id,
                capacity: row.capacity,
                get_time: row.get_time,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            animal_name: row.animal_name,
            animal_category: row.animal_category,
            product_name: row.product_name,
            product_union: row.product_union,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductYieldRow {
    #[sqlx(flatten)]
    product: ProductRow,
    produced: i64,
}

#[derive(sqlx::FromRow)]
struct AnimalYieldRow {
    #[sqlx(flatten)]
    animal: AnimalRow,
    produced: i64,
}

/// Repository for yields collected from animals
#[derive(Clone)]
pub struct AnimalProductRepository {
    db: DbConnection,
}

impl AnimalProductRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &AnimalProductFilter) {
        query.push(YIELD_FROM);
        if let Some(day) = &filter.day {
            query.push(" AND substr(ap.get_time, 1, 10) = ").push_bind(day.clone());
        }
    }
}

#[async_trait]
impl AnimalProductStorage for AnimalProductRepository {
    async fn store_animal_product(&self, record: &AnimalProduct) -> FarmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO animal_products (id, animal_id, product_id, capacity, get_time,
                                         created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.animal_id)
        .bind(&record.product_id)
        .bind(record.capacity)
        .bind(&record.get_time)
        .bind(&record.created_at)
        .bind(&record.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_animal_product(&self, record_id: &str) -> FarmResult<Option<AnimalProductDetail>> {
        let row = sqlx::query_as::<_, YieldRow>(&format!("{YIELD_COLUMNS} {YIELD_FROM} AND ap.id = ?"))
            .bind(record_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(AnimalProductDetail::from))
    }

    async fn update_animal_product(&self, record: &AnimalProduct) -> FarmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE animal_products
            SET animal_id = ?, product_id = ?, capacity = ?, get_time = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&record.animal_id)
        .bind(&record.product_id)
        .bind(record.capacity)
        .bind(&record.get_time)
        .bind(&record.updated_at)
        .bind(&record.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_animal_product(&self, record_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE animal_products SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(record_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_animal_products(
        &self,
        page: Page,
        filter: &AnimalProductFilter,
    ) -> FarmResult<(Vec<AnimalProductDetail>, u64)> {
        let mut query = QueryBuilder::<Sqlite>::new(YIELD_COLUMNS);
        Self::push_filters(&mut query, filter);
        query
            .push(" ORDER BY ap.get_time DESC, ap.id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<YieldRow>()
            .fetch_all(self.db.pool())
            .await?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*)");
        Self::push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        Ok((rows.into_iter().map(AnimalProductDetail::from).collect(), to_count(total)))
    }

    async fn products_of_animal(&self, animal_id: &str, page: Page) -> FarmResult<(Vec<ProductYield>, u64)> {
        let rows = sqlx::query_as::<_, ProductYieldRow>(&format!(
            r#"
            SELECT p.id, p.name, p.product_union, p.total_capacity, p.description,
                   p.created_at, p.updated_at, SUM(ap.capacity) AS produced
            {YIELD_FROM} AND ap.animal_id = ?
            GROUP BY p.id
            ORDER BY p.name, p.id
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(animal_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db.pool())
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(DISTINCT ap.product_id) {YIELD_FROM} AND ap.animal_id = ?"
        ))
        .bind(animal_id)
        .fetch_one(self.db.pool())
        .await?;

        let products = rows
            .into_iter()
            .map(|row| ProductYield {
                product: row.product.into(),
                produced: row.produced,
            })
            .collect();
        Ok((products, to_count(total)))
    }

    async fn animals_of_product(&self, product_id: &str, page: Page) -> FarmResult<(Vec<AnimalYield>, u64)> {
        let rows = sqlx::query_as::<_, AnimalYieldRow>(&format!(
            r#"
            SELECT a.id, a.name, a.category_name, a.gender, a.birth_day, a.genus, a.weight,
                   a.is_health, a.description, a.created_at, a.updated_at,
                   SUM(ap.capacity) AS produced
            {YIELD_FROM} AND ap.product_id = ?
            GROUP BY a.id
            ORDER BY a.name, a.id
            LIMIT ? OFFSET ?
            "#
        ))
        .bind(product_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db.pool())
        .await?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(DISTINCT ap.animal_id) {YIELD_FROM} AND ap.product_id = ?"
        ))
        .bind(product_id)
        .fetch_one(self.db.pool())
        .await?;

        let animals = rows
            .into_iter()
            .map(|row| AnimalYield {
                animal: row.animal.into(),
                produced: row.produced,
            })
            .collect();
        Ok((animals, to_count(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestFarm;
    use crate::storage::traits::{AnimalStorage, ProductStorage};

    fn page() -> Page {
        Page::new(1, 10).unwrap()
    }

    #[tokio::test]
    async fn test_get_joins_animal_and_product_names() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        let record = farm.animal_product("y1", "a1", "p1", 12, "2024-05-01 06:30:00").await;

        let detail = farm.yields.get_animal_product("y1").await.unwrap().unwrap();

        assert_eq!(detail.record, record);
        assert_eq!(detail.animal_name, "animal a1");
        assert_eq!(detail.animal_category, "cattle");
        assert_eq!(detail.product_name, "product p1");
        assert_eq!(detail.product_union, "litre");
    }

    #[tokio::test]
    async fn test_deleted_animal_or_product_hides_the_yield() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        farm.animal("a2").await;
        farm.product("p1").await;
        farm.product("p2").await;
        farm.animal_product("y1", "a1", "p1", 5, "2024-05-01 06:00:00").await;
        farm.animal_product("y2", "a2", "p2", 5, "2024-05-01 06:00:00").await;

        assert!(farm.animals.delete_animal("a1").await.unwrap());
        assert!(farm.products.delete_product("p2").await.unwrap());

        assert!(farm.yields.get_animal_product("y1").await.unwrap().is_none());
        assert!(farm.yields.get_animal_product("y2").await.unwrap().is_none());
        let (_, total) = farm
            .yields
            .list_animal_products(page(), &AnimalProductFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_day_newest_first() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        farm.animal_product("y1", "a1", "p1", 5, "2024-05-01 06:00:00").await;
        farm.animal_product("y2", "a1", "p1", 4, "2024-05-01 18:00:00").await;
        farm.animal_product("y3", "a1", "p1", 6, "2024-05-02 06:00:00").await;

        let (all, total) = farm
            .yields
            .list_animal_products(page(), &AnimalProductFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 3);
        let ids: Vec<_> = all.iter().map(|d| d.record.id.as_str()).collect();
        assert_eq!(ids, vec!["y3", "y2", "y1"]);

        let filter = AnimalProductFilter {
            day: Some("2024-05-01".to_string()),
        };
        let (first_day, total) = farm.yields.list_animal_products(page(), &filter).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(first_day[0].record.id, "y2");
    }

    #[tokio::test]
    async fn test_products_of_animal_sums_each_product() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        farm.product("p2").await;
        farm.animal_product("y1", "a1", "p1", 5, "2024-05-01 06:00:00").await;
        farm.animal_product("y2", "a1", "p1", 7, "2024-05-01 18:00:00").await;
        farm.animal_product("y3", "a1", "p2", 2, "2024-05-02 06:00:00").await;
        farm.animal_product("y4", "a1", "p2", 100, "2024-05-03 06:00:00").await;
        assert!(farm.yields.delete_animal_product("y4").await.unwrap());

        let (products, total) = farm.yields.products_of_animal("a1", page()).await.unwrap();

        assert_eq!(total, 2);
        assert_eq!(products[0].product.id, "p1");
        assert_eq!(products[0].produced, 12);
        assert_eq!(products[1].product.id, "p2");
        assert_eq!(products[1].produced, 2);
    }

    #[tokio::test]
    async fn test_animals_of_product_pages_by_animal() {
        let farm = TestFarm::new().await;
        farm.product("p1").await;
        for id in ["a1", "a2", "a3"] {
            farm.animal(id).await;
            farm.animal_product(&format!("y-{id}"), id, "p1", 3, "2024-05-01 06:00:00").await;
        }
        farm.animal_product("y-extra", "a2", "p1", 4, "2024-05-02 06:00:00").await;

        let second = Page::new(2, 2).unwrap();
        let (animals, total) = farm.yields.animals_of_product("p1", second).await.unwrap();

        assert_eq!(total, 3);
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].animal.id, "a3");

        let (animals, _) = farm.yields.animals_of_product("p1", page()).await.unwrap();
        assert_eq!(animals[1].animal.id, "a2");
        assert_eq!(animals[1].produced, 7);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let farm = TestFarm::new().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        let mut record = farm.animal_product("y1", "a1", "p1", 5, "2024-05-01 06:00:00").await;

        record.capacity = 9;
        record.get_time = "2024-05-01 07:00:00".to_string();
        assert!(farm.yields.update_animal_product(&record).await.unwrap());
        let stored = farm.yields.get_animal_product("y1").await.unwrap().unwrap();
        assert_eq!(stored.record.capacity, 9);

        assert!(farm.yields.delete_animal_product("y1").await.unwrap());
        assert!(!farm.yields.delete_animal_product("y1").await.unwrap());
        assert!(!farm.yields.update_animal_product(&record).await.unwrap());
    }
}
