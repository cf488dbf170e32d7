//! Inventory Domain
//!
//! Products held in stocks, and invoices issued by suppliers and handled by
//! operators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Lookups, validation, archiving, aggregation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     InMemoryProductRepository, InMemoryStockRepository, NewProduct, NewStock,
//!     ProductCategory, ProductService, StockService,
//! };
//!
//! # async fn example() -> domain_inventory::InventoryResult<()> {
//! let stocks = InMemoryStockRepository::new();
//! let stock_service = StockService::new(stocks.clone());
//! let product_service = ProductService::new(InMemoryProductRepository::new(), stocks);
//!
//! let stock = stock_service
//!     .add_stock(NewStock { title: "Main warehouse".to_string() })
//!     .await?;
//! let product = product_service
//!     .add_product(
//!         NewProduct {
//!             title: "P1".to_string(),
//!             price: 100.0,
//!             quantity: 10,
//!             category: ProductCategory::Electronics,
//!         },
//!         stock.id,
//!     )
//!     .await?;
//! assert_eq!(product.stock_id(), Some(stock.id));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EntityKind, InventoryError, InventoryResult};
pub use memory::{
    InMemoryInvoiceRepository, InMemoryOperatorRepository, InMemoryProductRepository,
    InMemoryStockRepository, InMemorySupplierRepository,
};
pub use models::{
    Invoice, NewInvoice, NewOperator, NewProduct, NewStock, NewSupplier, Operator, Product,
    ProductCategory, Stock, Supplier, SupplierCategory,
};
pub use repository::{
    InvoiceRepository, OperatorRepository, ProductRepository, StockRepository, SupplierRepository,
};
pub use service::{InvoiceService, OperatorService, ProductService, StockService, SupplierService};
