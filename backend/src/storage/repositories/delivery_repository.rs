use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::{deletion_mark, parse_category, push_like, to_count};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{Delivery, DeliveryFilter, Page};
use crate::storage::connection::DbConnection;
use crate::storage::traits::DeliveryStorage;

const DELIVERY_COLUMNS: &str = "id, name, category, eatables_id, capacity, product_union, time, \
                                created_at, updated_at";

#[derive(sqlx::FromRow)]
struct DeliveryRow {
    id: String,
    name: String,
    category: String,
    eatables_id: String,
    capacity: i64,
    product_union: String,
    time: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<DeliveryRow> for Delivery {
    type Error = FarmError;

    fn try_from(row: DeliveryRow) -> FarmResult<Self> {
        Ok(Delivery {
            id: row.id,
            name: row.name,
            category: parse_category(row.category)?,
            eatables_id: row.eatables_id,
            capacity: row.capacity,
            union: row.product_union,
            time: row.time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for deliveries into the catalog
#[derive(Clone)]
pub struct DeliveryRepository {
    db: DbConnection,
}

impl DeliveryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &DeliveryFilter) {
        query.push(" WHERE deleted_at IS NULL");
        if let Some(name) = &filter.name {
            push_like(query, "name", name);
        }
        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category.as_str());
        }
    }
}

#[async_trait]
impl DeliveryStorage for DeliveryRepository {
    async fn record_delivery(&self, delivery: &Delivery) -> FarmResult<bool> {
        let mut tx = self.db.pool().begin().await?;

        let restocked = sqlx::query(
            r#"
            UPDATE eatables
            SET capacity = capacity + ?, updated_at = ?
            WHERE id = ? AND category = ? AND deleted_at IS NULL
            "#,
        )
        .bind(delivery.capacity)
        .bind(&delivery.created_at)
        .bind(&delivery.eatables_id)
        .bind(delivery.category.as_str())
        .execute(&mut *tx)
        .await?;

        if restocked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO deliveries (id, name, category, eatables_id, capacity, product_union,
                                    time, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&delivery.id)
        .bind(&delivery.name)
        .bind(delivery.category.as_str())
        .bind(&delivery.eatables_id)
        .bind(delivery.capacity)
        .bind(&delivery.union)
        .bind(&delivery.time)
        .bind(&delivery.created_at)
        .bind(&delivery.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn get_delivery(&self, delivery_id: &str) -> FarmResult<Option<Delivery>> {
        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(delivery_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(Delivery::try_from).transpose()
    }

    async fn delete_delivery(&self, delivery_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE deliveries SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(delivery_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_deliveries(&self, page: Page, filter: &DeliveryFilter) -> FarmResult<(Vec<Delivery>, u64)> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {DELIVERY_COLUMNS} FROM deliveries"));
        Self::push_filters(&mut query, filter);
        query
            .push(" ORDER BY time DESC, id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<DeliveryRow>()
            .fetch_all(self.db.pool())
            .await?;
        let deliveries = rows
            .into_iter()
            .map(Delivery::try_from)
            .collect::<FarmResult<Vec<_>>>()?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM deliveries");
        Self::push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        Ok((deliveries, to_count(total)))
    }
}
