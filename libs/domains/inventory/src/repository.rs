use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::InventoryResult;
use crate::models::{Invoice, Operator, Product, ProductCategory, Stock, Supplier};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> InventoryResult<Vec<Product>>;

    /// Insert or replace a product
    async fn save(&self, product: Product) -> InventoryResult<Product>;

    /// Delete a product by ID, returns whether it existed
    async fn delete(&self, id: Uuid) -> InventoryResult<bool>;

    /// Products of the given category
    async fn find_by_category(&self, category: ProductCategory) -> InventoryResult<Vec<Product>>;

    /// Products held by the given stock
    async fn find_by_stock_id(&self, stock_id: Uuid) -> InventoryResult<Vec<Product>>;
}

/// Repository trait for Stock persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Stock>>;

    async fn list(&self) -> InventoryResult<Vec<Stock>>;

    async fn save(&self, stock: Stock) -> InventoryResult<Stock>;
}

/// Repository trait for Invoice persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Invoice>>;

    async fn list(&self) -> InventoryResult<Vec<Invoice>>;

    async fn save(&self, invoice: Invoice) -> InventoryResult<Invoice>;

    /// Sum of active invoice amounts created within `[start, end]`.
    ///
    /// `None` when no invoice matches, like SQL `SUM` over an empty set.
    async fn total_amount_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> InventoryResult<Option<f64>>;
}

/// Repository trait for Operator persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OperatorRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Operator>>;

    async fn list(&self) -> InventoryResult<Vec<Operator>>;

    async fn save(&self, operator: Operator) -> InventoryResult<Operator>;

    async fn delete(&self, id: Uuid) -> InventoryResult<bool>;
}

/// Repository trait for Supplier persistence
///
/// Lookups return suppliers with their issued invoices populated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Supplier>>;

    async fn list(&self) -> InventoryResult<Vec<Supplier>>;

    async fn save(&self, supplier: Supplier) -> InventoryResult<Supplier>;

    async fn delete(&self, id: Uuid) -> InventoryResult<bool>;
}
