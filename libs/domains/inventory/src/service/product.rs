//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EntityKind, InventoryError, InventoryResult};
use crate::models::{NewProduct, Product, ProductCategory};
use crate::repository::{ProductRepository, StockRepository};

/// Product service
///
/// Products are always attached to an existing stock on creation, so the
/// service needs both repositories.
pub struct ProductService<P: ProductRepository, S: StockRepository> {
    products: Arc<P>,
    stocks: Arc<S>,
}

impl<P: ProductRepository, S: StockRepository> ProductService<P, S> {
    pub fn new(products: P, stocks: S) -> Self {
        Self {
            products: Arc::new(products),
            stocks: Arc::new(stocks),
        }
    }

    /// Create a product and attach it to the stock `stock_id`
    #[instrument(skip(self, input), fields(product_title = %input.title))]
    pub async fn add_product(&self, input: NewProduct, stock_id: Uuid) -> InventoryResult<Product> {
        input
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        let stock = self.stocks.get_by_id(stock_id).await?.ok_or_else(|| {
            tracing::warn!(%stock_id, "Cannot add product to unknown stock");
            InventoryError::not_found(EntityKind::Stock, stock_id)
        })?;

        let mut product = Product::new(input);
        product.stock = Some(stock);

        self.products.save(product).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn retrieve_product(&self, id: Uuid) -> InventoryResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Product, id))
    }

    #[instrument(skip(self))]
    pub async fn retrieve_all_products(&self) -> InventoryResult<Vec<Product>> {
        self.products.list().await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_products_by_category(
        &self,
        category: ProductCategory,
    ) -> InventoryResult<Vec<Product>> {
        self.products.find_by_category(category).await
    }

    /// Delete a product; unknown ids are ignored
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> InventoryResult<()> {
        if !self.products.delete(id).await? {
            tracing::debug!(product_id = %id, "Nothing to delete");
        }
        Ok(())
    }

    /// Products held by the given stock
    #[instrument(skip(self))]
    pub async fn retrieve_products_by_stock(
        &self,
        stock_id: Uuid,
    ) -> InventoryResult<Vec<Product>> {
        self.products.find_by_stock_id(stock_id).await
    }
}

impl<P: ProductRepository, S: StockRepository> Clone for ProductService<P, S> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            stocks: Arc::clone(&self.stocks),
        }
    }
}
