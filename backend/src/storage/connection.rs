use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::config::DatabaseConfig;

/// DbConnection owns the SQLite pool and the schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (and create if needed) the database described by `config`
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(&config.url).await.unwrap_or(false) {
            Sqlite::create_database(&config.url).await?
        }

        let options = SqliteConnectOptions::from_str(&config.url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize an isolated in-memory database for tests.
    ///
    /// Every pooled connection to `sqlite::memory:` would get its own empty
    /// database, so the pool is pinned to a single connection that never
    /// expires.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS animals (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category_name TEXT NOT NULL,
                gender TEXT NOT NULL,
                birth_day TEXT,
                genus TEXT,
                weight INTEGER NOT NULL DEFAULT 0,
                is_health BOOLEAN NOT NULL DEFAULT TRUE,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Foods and drugs share one table, told apart by category
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS eatables (
                id TEXT PRIMARY KEY,
                category TEXT NOT NULL CHECK (category IN ('food', 'drug')),
                name TEXT NOT NULL,
                status TEXT,
                capacity INTEGER NOT NULL DEFAULT 0 CHECK (capacity >= 0),
                product_union TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_eatables_category_name
            ON eatables(category, name);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                product_union TEXT NOT NULL,
                total_capacity INTEGER NOT NULL DEFAULT 0,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS deliveries (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN ('food', 'drug')),
                eatables_id TEXT NOT NULL,
                capacity INTEGER NOT NULL,
                product_union TEXT NOT NULL,
                time TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (eatables_id) REFERENCES eatables (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Yields collected from animals
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS animal_products (
                id TEXT PRIMARY KEY,
                animal_id TEXT NOT NULL,
                product_id TEXT NOT NULL,
                capacity INTEGER NOT NULL DEFAULT 0 CHECK (capacity >= 0),
                get_time TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (animal_id) REFERENCES animals (id),
                FOREIGN KEY (product_id) REFERENCES products (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_animal_products_animal_id
            ON animal_products(animal_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_animal_products_product_id
            ON animal_products(product_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Schedule assignments; `daily` holds a JSON array of {capacity, time}
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS animal_eatable_info (
                id TEXT PRIMARY KEY,
                animal_id TEXT NOT NULL,
                eatables_id TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN ('food', 'drug')),
                daily TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (animal_id) REFERENCES animals (id),
                FOREIGN KEY (eatables_id) REFERENCES eatables (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_animal_eatable_info_animal_id
            ON animal_eatable_info(animal_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Feeding ledger, one row per logged feeding day
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS animal_given_eatables (
                id TEXT PRIMARY KEY,
                animal_id TEXT NOT NULL,
                eatables_id TEXT NOT NULL,
                category TEXT NOT NULL CHECK (category IN ('food', 'drug')),
                day TEXT NOT NULL,
                daily TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (animal_id) REFERENCES animals (id),
                FOREIGN KEY (eatables_id) REFERENCES eatables (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_animal_given_eatables_animal_id
            ON animal_given_eatables(animal_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
