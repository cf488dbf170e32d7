//! Service layer
//!
//! Each service owns `Arc`s of the repositories it was constructed with and
//! turns missing records into [`InventoryError::NotFound`](crate::InventoryError).

mod invoice;
mod operator;
mod product;
mod stock;
mod supplier;

pub use invoice::InvoiceService;
pub use operator::OperatorService;
pub use product::ProductService;
pub use stock::StockService;
pub use supplier::SupplierService;
