use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::animal_products::{
    AnimalProductsResult, ListYieldsQuery, ProductAnimalsResult, RecordYieldCommand,
    UpdateYieldCommand, YieldListResult,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{
    Animal, AnimalProduct, AnimalProductDetail, AnimalProductFilter, Page, Product,
};
use crate::domain::validation;
use crate::storage::traits::{AnimalProductStorage, AnimalStorage, ProductStorage};

const ENTITY: &str = "animal product";

/// Service for yields: which animal gave how much of which product, and when.
///
/// Recording a yield leaves the product's `total_capacity` untouched.
#[derive(Clone)]
pub struct AnimalProductService {
    yields: Arc<dyn AnimalProductStorage>,
    animals: Arc<dyn AnimalStorage>,
    products: Arc<dyn ProductStorage>,
}

impl AnimalProductService {
    pub fn new(
        yields: Arc<dyn AnimalProductStorage>,
        animals: Arc<dyn AnimalStorage>,
        products: Arc<dyn ProductStorage>,
    ) -> Self {
        Self {
            yields,
            animals,
            products,
        }
    }

    pub async fn record_yield(&self, command: RecordYieldCommand) -> FarmResult<AnimalProductDetail> {
        info!(
            "Recording {} of product {} from animal {} at {}",
            command.capacity, command.product_id, command.animal_id, command.get_time
        );

        let capacity = validation::non_negative("capacity", command.capacity)?;
        let get_time = validation::date_time("get_time", &command.get_time)?;
        self.require_animal(&command.animal_id).await?;
        self.require_product(&command.product_id).await?;

        let now = validation::now_rfc3339();
        let record = AnimalProduct {
            id: validation::new_id(),
            animal_id: command.animal_id,
            product_id: command.product_id,
            capacity,
            get_time,
            created_at: now.clone(),
            updated_at: now,
        };
        self.yields.store_animal_product(&record).await?;

        self.get_yield(&record.id).await
    }

    pub async fn get_yield(&self, yield_id: &str) -> FarmResult<AnimalProductDetail> {
        self.yields
            .get_animal_product(yield_id)
            .await?
            .ok_or_else(|| FarmError::not_found(ENTITY, yield_id))
    }

    pub async fn update_yield(&self, command: UpdateYieldCommand) -> FarmResult<AnimalProductDetail> {
        info!("Updating animal product: {}", command.yield_id);

        let mut record = self.get_yield(&command.yield_id).await?.record;
        record.capacity = validation::non_negative("capacity", command.capacity)?;
        record.get_time = validation::date_time("get_time", &command.get_time)?;
        self.require_animal(&command.animal_id).await?;
        self.require_product(&command.product_id).await?;

        record.animal_id = command.animal_id;
        record.product_id = command.product_id;
        record.updated_at = validation::now_rfc3339();

        if !self.yields.update_animal_product(&record).await? {
            return Err(FarmError::not_found(ENTITY, record.id));
        }
        self.get_yield(&record.id).await
    }

    pub async fn delete_yield(&self, yield_id: &str) -> FarmResult<()> {
        info!("Deleting animal product: {}", yield_id);

        if !self.yields.delete_animal_product(yield_id).await? {
            warn!("Animal product not found for delete: {}", yield_id);
            return Err(FarmError::not_found(ENTITY, yield_id));
        }
        Ok(())
    }

    pub async fn list_yields(&self, query: ListYieldsQuery) -> FarmResult<YieldListResult> {
        let page = Page::new(query.page, query.limit)?;
        let filter = AnimalProductFilter {
            day: query
                .filter
                .day
                .map(|day| validation::calendar_date("day", &day))
                .transpose()?,
        };

        let (yields, count) = self.yields.list_animal_products(page, &filter).await?;
        Ok(YieldListResult { yields, count })
    }

    /// Each product the animal gave with its summed capacity
    pub async fn products_of_animal(
        &self,
        animal_id: &str,
        page: u32,
        limit: u32,
    ) -> FarmResult<AnimalProductsResult> {
        let page = Page::new(page, limit)?;
        let animal = self.require_animal(animal_id).await?;

        let (products, count) = self.yields.products_of_animal(animal_id, page).await?;
        Ok(AnimalProductsResult {
            animal,
            products,
            count,
        })
    }

    /// Each animal that gave the product with its summed capacity
    pub async fn animals_of_product(
        &self,
        product_id: &str,
        page: u32,
        limit: u32,
    ) -> FarmResult<ProductAnimalsResult> {
        let page = Page::new(page, limit)?;
        let product = self.require_product(product_id).await?;

        let (animals, count) = self.yields.animals_of_product(product_id, page).await?;
        Ok(ProductAnimalsResult {
            product,
            animals,
            count,
        })
    }

    async fn require_animal(&self, animal_id: &str) -> FarmResult<Animal> {
        self.animals.get_animal(animal_id).await?.ok_or_else(|| {
            warn!("Animal not found: {}", animal_id);
            FarmError::not_found("animal", animal_id)
        })
    }

    async fn require_product(&self, product_id: &str) -> FarmResult<Product> {
        self.products.get_product(product_id).await?.ok_or_else(|| {
            warn!("Product not found: {}", product_id);
            FarmError::not_found("product", product_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestFarm;

    async fn setup() -> (TestFarm, AnimalProductService) {
        let farm = TestFarm::new().await;
        let service = AnimalProductService::new(
            farm.yields.clone(),
            farm.animals.clone(),
            farm.products.clone(),
        );
        (farm, service)
    }

    fn milking(capacity: i64, get_time: &str) -> RecordYieldCommand {
        RecordYieldCommand {
            animal_id: "a1".to_string(),
            product_id: "p1".to_string(),
            capacity,
            get_time: get_time.to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_returns_joined_yield() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        farm.product("p1").await;

        let detail = service.record_yield(milking(12, "2024-05-01 06:30:00")).await.unwrap();

        assert_eq!(detail.record.capacity, 12);
        assert_eq!(detail.animal_name, "animal a1");
        assert_eq!(detail.product_name, "product p1");
        assert_eq!(service.get_yield(&detail.record.id).await.unwrap(), detail);
    }

    #[tokio::test]
    async fn test_record_requires_live_animal_and_product() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;

        let err = service.record_yield(milking(1, "2024-05-01 06:30:00")).await.unwrap_err();
        assert!(matches!(err, FarmError::NotFound { entity: "product", .. }));

        farm.product("p1").await;
        farm.animals.delete_animal("a1").await.unwrap();
        let err = service.record_yield(milking(1, "2024-05-01 06:30:00")).await.unwrap_err();
        assert!(matches!(err, FarmError::NotFound { entity: "animal", .. }));
    }

    #[tokio::test]
    async fn test_record_rejects_bad_capacity_and_time() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        farm.product("p1").await;

        let negative = service.record_yield(milking(-1, "2024-05-01 06:30:00")).await;
        assert!(matches!(negative, Err(FarmError::Validation(_))));

        let bad_time = service.record_yield(milking(1, "2024-05-01")).await;
        assert!(matches!(bad_time, Err(FarmError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_moves_yield_to_another_product() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        farm.product("p2").await;
        let detail = service.record_yield(milking(3, "2024-05-01 06:30:00")).await.unwrap();

        let updated = service
            .update_yield(UpdateYieldCommand {
                yield_id: detail.record.id.clone(),
                animal_id: "a1".to_string(),
                product_id: "p2".to_string(),
                capacity: 4,
                get_time: "2024-05-01 07:00:00".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(updated.record.product_id, "p2");
        assert_eq!(updated.product_name, "product p2");
        assert_eq!(updated.record.created_at, detail.record.created_at);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        let first = service.record_yield(milking(3, "2024-05-01 06:30:00")).await.unwrap();
        service.record_yield(milking(5, "2024-05-02 06:30:00")).await.unwrap();

        service.delete_yield(&first.record.id).await.unwrap();
        assert!(service.delete_yield(&first.record.id).await.unwrap_err().is_not_found());

        let listed = service
            .list_yields(ListYieldsQuery {
                page: 1,
                limit: 10,
                filter: AnimalProductFilter::default(),
            })
            .await
            .unwrap();
        assert_eq!(listed.count, 1);

        let bad_day = service
            .list_yields(ListYieldsQuery {
                page: 1,
                limit: 10,
                filter: AnimalProductFilter {
                    day: Some("May 2nd".to_string()),
                },
            })
            .await;
        assert!(matches!(bad_day, Err(FarmError::Validation(_))));
    }

    #[tokio::test]
    async fn test_per_animal_and_per_product_totals() {
        let (farm, service) = setup().await;
        farm.animal("a1").await;
        farm.product("p1").await;
        service.record_yield(milking(3, "2024-05-01 06:30:00")).await.unwrap();
        service.record_yield(milking(5, "2024-05-01 18:30:00")).await.unwrap();

        let by_animal = service.products_of_animal("a1", 1, 10).await.unwrap();
        assert_eq!(by_animal.animal.id, "a1");
        assert_eq!(by_animal.count, 1);
        assert_eq!(by_animal.products[0].produced, 8);

        let by_product = service.animals_of_product("p1", 1, 10).await.unwrap();
        assert_eq!(by_product.product.id, "p1");
        assert_eq!(by_product.animals[0].produced, 8);

        assert!(service.products_of_animal("ghost", 1, 10).await.unwrap_err().is_not_found());
        assert!(matches!(
            service.animals_of_product("p1", 0, 10).await,
            Err(FarmError::Validation(_))
        ));
    }
}
