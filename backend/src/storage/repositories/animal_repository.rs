use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::{deletion_mark, push_like, to_count};
use crate::domain::error::FarmResult;
use crate::domain::models::{Animal, AnimalFilter, Page};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AnimalStorage;

const ANIMAL_COLUMNS: &str = "id, name, category_name, gender, birth_day, genus, weight, \
                              is_health, description, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(super) struct AnimalRow {
    id: String,
    name: String,
    category_name: String,
    gender: String,
    birth_day: Option<String>,
    genus: Option<String>,
    weight: u32,
    is_health: bool,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<AnimalRow> for Animal {
    fn from(row: AnimalRow) -> Self {
        Animal {
            id: row.id,
            name: row.name,
            category_name: row.category_name,
            gender: row.gender,
            birth_day: row.birth_day,
            genus: row.genus,
            weight: row.weight,
            is_health: row.is_health,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for animal operations
#[derive(Clone)]
pub struct AnimalRepository {
    db: DbConnection,
}

impl AnimalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &AnimalFilter) {
        query.push(" WHERE deleted_at IS NULL");
        if let Some(category) = &filter.category {
            push_like(query, "category_name", category);
        }
        if let Some(genus) = &filter.genus {
            push_like(query, "genus", genus);
        }
        if let Some(gender) = &filter.gender {
            push_like(query, "gender", gender);
        }
        if let Some(is_health) = filter.is_health {
            query.push(" AND is_health = ").push_bind(is_health);
        }
        if let Some((low, high)) = filter.weight_band() {
            query
                .push(" AND weight BETWEEN ")
                .push_bind(low)
                .push(" AND ")
                .push_bind(high);
        }
    }
}

#[async_trait]
impl AnimalStorage for AnimalRepository {
    async fn store_animal(&self, animal: &Animal) -> FarmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO animals (id, name, category_name, gender, birth_day, genus, weight,
                                 is_health, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&animal.id)
        .bind(&animal.name)
        .bind(&animal.category_name)
        .bind(&animal.gender)
        .bind(&animal.birth_day)
        .bind(&animal.genus)
        .bind(animal.weight)
        .bind(animal.is_health)
        .bind(&animal.description)
        .bind(&animal.created_at)
        .bind(&animal.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_animal(&self, animal_id: &str) -> FarmResult<Option<Animal>> {
        let row = sqlx::query_as::<_, AnimalRow>(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(animal_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Animal::from))
    }

    async fn update_animal(&self, animal: &Animal) -> FarmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE animals
            SET name = ?, category_name = ?, gender = ?, birth_day = ?, genus = ?,
                weight = ?, is_health = ?, description = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&animal.name)
        .bind(&animal.category_name)
        .bind(&animal.gender)
        .bind(&animal.birth_day)
        .bind(&animal.genus)
        .bind(animal.weight)
        .bind(animal.is_health)
        .bind(&animal.description)
        .bind(&animal.updated_at)
        .bind(&animal.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_animal(&self, animal_id: &str) -> FarmResult<bool> {
        let result = sqlx::query(
            "UPDATE animals SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(deletion_mark())
        .bind(animal_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_animals(&self, page: Page, filter: &AnimalFilter) -> FarmResult<(Vec<Animal>, u64)> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {ANIMAL_COLUMNS} FROM animals"));
        Self::push_filters(&mut query, filter);
        if filter.weight_band().is_some() {
            query.push(" ORDER BY weight DESC, id");
        } else {
            query.push(" ORDER BY created_at, id");
        }
        query
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = query
            .build_query_as::<AnimalRow>()
            .fetch_all(self.db.pool())
            .await?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM animals");
        Self::push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        Ok((rows.into_iter().map(Animal::from).collect(), to_count(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(id: &str, name: &str, weight: u32) -> Animal {
        Animal {
            id: id.to_string(),
            name: name.to_string(),
            category_name: "cattle".to_string(),
            gender: "female".to_string(),
            birth_day: Some("2020-04-01".to_string()),
            genus: None,
            weight,
            is_health: true,
            description: None,
            created_at: format!("2024-01-01T00:00:0{}Z", weight % 10),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    async fn setup_test() -> AnimalRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AnimalRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_get_animal() {
        let repo = setup_test().await;
        let cow = animal("a1", "Bessie", 400);
        repo.store_animal(&cow).await.expect("Failed to store animal");

        let loaded = repo.get_animal("a1").await.expect("Failed to get animal");
        assert_eq!(loaded, Some(cow));
        assert_eq!(repo.get_animal("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_soft_deleted_animal_is_invisible() {
        let repo = setup_test().await;
        repo.store_animal(&animal("a1", "Bessie", 400)).await.unwrap();

        assert!(repo.delete_animal("a1").await.unwrap());
        assert_eq!(repo.get_animal("a1").await.unwrap(), None);
        // Already deleted
        assert!(!repo.delete_animal("a1").await.unwrap());

        let mut update = animal("a1", "Renamed", 400);
        update.updated_at = "2024-02-01T00:00:00Z".to_string();
        assert!(!repo.update_animal(&update).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_by_weight_band() {
        let repo = setup_test().await;
        repo.store_animal(&animal("a1", "Light", 100)).await.unwrap();
        repo.store_animal(&animal("a2", "Near", 205)).await.unwrap();
        repo.store_animal(&animal("a3", "Exact", 200)).await.unwrap();
        repo.store_animal(&animal("a4", "Heavy", 300)).await.unwrap();

        let filter = AnimalFilter {
            weight: Some(200),
            ..Default::default()
        };
        let (animals, total) = repo
            .list_animals(Page::new(1, 10).unwrap(), &filter)
            .await
            .unwrap();

        assert_eq!(total, 2);
        let names: Vec<_> = animals.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Exact"]);
    }

    #[tokio::test]
    async fn test_list_counts_all_matches_not_just_the_page() {
        let repo = setup_test().await;
        for i in 1..=5 {
            repo.store_animal(&animal(&format!("a{i}"), &format!("Cow {i}"), i))
                .await
                .unwrap();
        }

        let filter = AnimalFilter {
            category: Some("CAT".to_string()),
            ..Default::default()
        };
        let (animals, total) = repo
            .list_animals(Page::new(2, 2).unwrap(), &filter)
            .await
            .unwrap();

        assert_eq!(total, 5);
        assert_eq!(animals.len(), 2);
        assert_eq!(animals[0].id, "a3");
        assert_eq!(animals[1].id, "a4");
    }
}
