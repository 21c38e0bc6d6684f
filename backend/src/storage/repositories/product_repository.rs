use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::{deletion_mark, push_like, to_count};
use crate::domain::error::FarmResult;
use crate::domain::models::{Page, Product, ProductFilter};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ProductStorage;

const PRODUCT_COLUMNS: &str =
    "id, name, product_union, total_capacity, description, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(super) struct ProductRow {
    id: String,
    name: String,
    product_union: String,
    total_capacity: i64,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            union: row.product_union,
            total_capacity: row.total_capacity,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product operations
#[derive(Clone)]
pub struct ProductRepository {
    db: DbConnection,
}

impl ProductRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &ProductFilter) {
        query.push(" WHERE deleted_at IS NULL");
        if let Some(name) = &filter.name {
            push_like(query, "name", name);
        }
        if let Some(union) = &filter.union {
            push_like(query, "product_union", union);
        }
    }
}

#[async_trait]
impl ProductStorage for ProductRepository {
    async fn store_product(&self, product: &Product) -> FarmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, product_union, total_capacity, description,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.union)
        .bind(product.total_capacity)
        .bind(&product.description)
        .bind(&product.created_at)
        .bind(&product.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_product(&self, product_id: &str) -> FarmResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(product_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_by_name(&self, name: &str) -> FarmResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ? AND deleted_at IS NULL LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn update_product(&self, product: &Product) -> FarmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, product_union = ?, total_capacity = ?, description = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&product.name)
        .bind(&product.union)
        .bind(product.total_capacity)
        .bind(&product.description)
        .bind(&product.updated_at)
        .bind(&product.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, product_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(product_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_products(&self, page: Page, filter: &ProductFilter) -> FarmResult<(Vec<Product>, u64)> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        Self::push_filters(&mut query, filter);
        query
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.db.pool())
            .await?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
        Self::push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        Ok((rows.into_iter().map(Product::from).collect(), to_count(total)))
    }
}
