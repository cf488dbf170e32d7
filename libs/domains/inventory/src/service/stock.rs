use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EntityKind, InventoryError, InventoryResult};
use crate::models::{NewStock, Stock};
use crate::repository::StockRepository;

/// Stock service
pub struct StockService<R: StockRepository> {
    repository: Arc<R>,
}

impl<R: StockRepository> StockService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a stock; returns whatever the repository persisted
    #[instrument(skip(self, input), fields(stock_title = %input.title))]
    pub async fn add_stock(&self, input: NewStock) -> InventoryResult<Stock> {
        input
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        self.repository.save(Stock::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_stock(&self, id: Uuid) -> InventoryResult<Stock> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Stock, id))
    }

    #[instrument(skip(self))]
    pub async fn retrieve_all_stocks(&self) -> InventoryResult<Vec<Stock>> {
        self.repository.list().await
    }
}

impl<R: StockRepository> Clone for StockService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
