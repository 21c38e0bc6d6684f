use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::products::{
    CreateProductCommand, ListProductsQuery, ProductListResult, UpdateProductCommand,
};
use crate::domain::error::{FarmError, FarmResult};
use crate::domain::models::{Page, Product};
use crate::domain::validation::{self, MAX_NAME_LEN};
use crate::storage::traits::ProductStorage;

const ENTITY: &str = "product";

/// Service for farm products such as milk or wool
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStorage>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStorage>) -> Self {
        Self { products }
    }

    pub async fn create_product(&self, command: CreateProductCommand) -> FarmResult<Product> {
        info!("Creating product: name={}", command.name);

        let name = validation::required_text("name", &command.name, MAX_NAME_LEN)?;
        self.ensure_unique_name(&name, None).await?;

        let now = validation::now_rfc3339();
        let product = Product {
            id: validation::new_id(),
            name,
            union: validation::required_text("union", &command.union, MAX_NAME_LEN)?,
            total_capacity: validation::non_negative("total_capacity", command.total_capacity)?,
            description: validation::optional_text(command.description),
            created_at: now.clone(),
            updated_at: now,
        };

        self.products.store_product(&product).await?;
        Ok(product)
    }

    pub async fn get_product(&self, product_id: &str) -> FarmResult<Product> {
        self.products.get_product(product_id).await?.ok_or_else(|| {
            warn!("Product not found: {}", product_id);
            FarmError::not_found(ENTITY, product_id)
        })
    }

    pub async fn update_product(&self, command: UpdateProductCommand) -> FarmResult<Product> {
        info!("Updating product: {}", command.product_id);

        let mut product = self.get_product(&command.product_id).await?;
        let name = validation::required_text("name", &command.name, MAX_NAME_LEN)?;
        self.ensure_unique_name(&name, Some(&product.id)).await?;

        product.name = name;
        product.union = validation::required_text("union", &command.union, MAX_NAME_LEN)?;
        product.total_capacity = validation::non_negative("total_capacity", command.total_capacity)?;
        product.description = validation::optional_text(command.description);
        product.updated_at = validation::now_rfc3339();

        if !self.products.update_product(&product).await? {
            return Err(FarmError::not_found(ENTITY, product.id));
        }
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: &str) -> FarmResult<()> {
        info!("Deleting product: {}", product_id);

        if !self.products.delete_product(product_id).await? {
            return Err(FarmError::not_found(ENTITY, product_id));
        }
        Ok(())
    }

    pub async fn list_products(&self, query: ListProductsQuery) -> FarmResult<ProductListResult> {
        let page = Page::new(query.page, query.limit)?;
        let (products, count) = self.products.list_products(page, &query.filter).await?;
        Ok(ProductListResult { products, count })
    }

    async fn ensure_unique_name(&self, name: &str, current_id: Option<&str>) -> FarmResult<()> {
        match self.products.find_by_name(name).await? {
            Some(existing) if Some(existing.id.as_str()) != current_id => Err(FarmError::Conflict(
                format!("product named {name:?} already exists"),
            )),
            _ => Ok(()),
        }
    }
}
