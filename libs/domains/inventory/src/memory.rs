//! In-memory repository implementations (for development/testing)
//!
//! Every repository is a cheap handle over shared state, so cloning one and
//! handing the clones to several services makes them observe the same data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::InventoryResult;
use crate::models::{Invoice, Operator, Product, ProductCategory, Stock, Supplier};
use crate::repository::{
    InvoiceRepository, OperatorRepository, ProductRepository, StockRepository, SupplierRepository,
};

type Table<T> = Arc<RwLock<BTreeMap<Uuid, T>>>;

/// In-memory implementation of ProductRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Table<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let products = self.products.read().await;
        products.values().filter(|&p| predicate(p)).cloned().collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn save(&self, product: Product) -> InventoryResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, stock_id = ?product.stock_id(), "Saved product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_category(&self, category: ProductCategory) -> InventoryResult<Vec<Product>> {
        Ok(self.filtered(|p| p.category == category).await)
    }

    async fn find_by_stock_id(&self, stock_id: Uuid) -> InventoryResult<Vec<Product>> {
        Ok(self.filtered(|p| p.stock_id() == Some(stock_id)).await)
    }
}

/// In-memory implementation of StockRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryStockRepository {
    stocks: Table<Stock>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Stock>> {
        let stocks = self.stocks.read().await;
        Ok(stocks.get(&id).cloned())
    }

    async fn list(&self) -> InventoryResult<Vec<Stock>> {
        let stocks = self.stocks.read().await;
        Ok(stocks.values().cloned().collect())
    }

    async fn save(&self, stock: Stock) -> InventoryResult<Stock> {
        let mut stocks = self.stocks.write().await;
        stocks.insert(stock.id, stock.clone());

        tracing::info!(stock_id = %stock.id, "Saved stock");
        Ok(stock)
    }
}

/// In-memory implementation of InvoiceRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryInvoiceRepository {
    invoices: Table<Invoice>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn issued_by(&self, supplier_id: Uuid) -> Vec<Invoice> {
        let invoices = self.invoices.read().await;
        invoices
            .values()
            .filter(|i| i.supplier_id == Some(supplier_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.get(&id).cloned())
    }

    async fn list(&self) -> InventoryResult<Vec<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.values().cloned().collect())
    }

    async fn save(&self, invoice: Invoice) -> InventoryResult<Invoice> {
        let mut invoices = self.invoices.write().await;
        invoices.insert(invoice.id, invoice.clone());

        tracing::info!(invoice_id = %invoice.id, archived = invoice.archived, "Saved invoice");
        Ok(invoice)
    }

    async fn total_amount_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> InventoryResult<Option<f64>> {
        let invoices = self.invoices.read().await;

        let total = invoices
            .values()
            .filter(|i| !i.archived && i.date_creation >= start && i.date_creation <= end)
            .map(|i| i.amount)
            .reduce(|acc, amount| acc + amount);

        Ok(total)
    }
}

/// In-memory implementation of OperatorRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryOperatorRepository {
    operators: Table<Operator>,
}

impl InMemoryOperatorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OperatorRepository for InMemoryOperatorRepository {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Operator>> {
        let operators = self.operators.read().await;
        Ok(operators.get(&id).cloned())
    }

    async fn list(&self) -> InventoryResult<Vec<Operator>> {
        let operators = self.operators.read().await;
        Ok(operators.values().cloned().collect())
    }

    async fn save(&self, operator: Operator) -> InventoryResult<Operator> {
        let mut operators = self.operators.write().await;
        operators.insert(operator.id, operator.clone());

        tracing::info!(
            operator_id = %operator.id,
            invoices = operator.invoices.len(),
            "Saved operator"
        );
        Ok(operator)
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let mut operators = self.operators.write().await;

        if operators.remove(&id).is_some() {
            tracing::info!(operator_id = %id, "Deleted operator");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// In-memory implementation of SupplierRepository
///
/// Invoices are not stored on the supplier records; lookups join them from
/// the invoice repository by `Invoice::supplier_id`.
#[derive(Debug, Clone)]
pub struct InMemorySupplierRepository {
    suppliers: Table<Supplier>,
    invoices: InMemoryInvoiceRepository,
}

impl InMemorySupplierRepository {
    pub fn new(invoices: InMemoryInvoiceRepository) -> Self {
        Self {
            suppliers: Arc::default(),
            invoices,
        }
    }

    async fn populate(&self, mut supplier: Supplier) -> Supplier {
        supplier.invoices = self.invoices.issued_by(supplier.id).await;
        supplier
    }
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Supplier>> {
        let supplier = self.suppliers.read().await.get(&id).cloned();

        match supplier {
            Some(supplier) => Ok(Some(self.populate(supplier).await)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> InventoryResult<Vec<Supplier>> {
        let suppliers: Vec<Supplier> = self.suppliers.read().await.values().cloned().collect();

        let mut result = Vec::with_capacity(suppliers.len());
        for supplier in suppliers {
            result.push(self.populate(supplier).await);
        }
        Ok(result)
    }

    async fn save(&self, supplier: Supplier) -> InventoryResult<Supplier> {
        {
            let mut suppliers = self.suppliers.write().await;
            let mut stored = supplier.clone();
            stored.invoices.clear();
            suppliers.insert(stored.id, stored);
        }

        tracing::info!(supplier_id = %supplier.id, code = %supplier.code, "Saved supplier");
        Ok(self.populate(supplier).await)
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let mut suppliers = self.suppliers.write().await;

        if suppliers.remove(&id).is_some() {
            tracing::info!(supplier_id = %id, "Deleted supplier");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewInvoice, NewProduct, NewStock, NewSupplier, SupplierCategory};
    use chrono::{Duration, TimeZone};

    fn invoice_on(day: u32, amount: f64, supplier_id: Option<Uuid>) -> Invoice {
        Invoice::new(NewInvoice {
            amount,
            amount_discount: 0.0,
            date_creation: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            supplier_id,
        })
    }

    #[tokio::test]
    async fn test_product_save_and_filters() {
        let repo = InMemoryProductRepository::new();
        let stock = Stock::new(NewStock {
            title: "main".to_string(),
        });

        let mut tv = Product::new(NewProduct {
            title: "tv".to_string(),
            price: 499.0,
            quantity: 3,
            category: ProductCategory::Electronics,
        });
        tv.stock = Some(stock.clone());
        let shirt = Product::new(NewProduct {
            title: "shirt".to_string(),
            price: 19.0,
            quantity: 40,
            category: ProductCategory::Clothing,
        });

        repo.save(tv.clone()).await.unwrap();
        repo.save(shirt.clone()).await.unwrap();

        let electronics = repo
            .find_by_category(ProductCategory::Electronics)
            .await
            .unwrap();
        assert_eq!(electronics.len(), 1);
        assert_eq!(electronics[0].id, tv.id);

        let stocked = repo.find_by_stock_id(stock.id).await.unwrap();
        assert_eq!(stocked.len(), 1);
        assert_eq!(stocked[0].id, tv.id);

        assert!(repo.delete(shirt.id).await.unwrap());
        assert!(!repo.delete(shirt.id).await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let repo = InMemoryStockRepository::new();
        let mut stock = Stock::new(NewStock {
            title: "before".to_string(),
        });
        repo.save(stock.clone()).await.unwrap();

        stock.title = "after".to_string();
        repo.save(stock.clone()).await.unwrap();

        let stocks = repo.list().await.unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].title, "after");
    }

    #[tokio::test]
    async fn test_total_amount_between_skips_archived_and_out_of_range() {
        let repo = InMemoryInvoiceRepository::new();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(10);

        repo.save(invoice_on(2, 100.0, None)).await.unwrap();
        repo.save(invoice_on(5, 50.5, None)).await.unwrap();
        repo.save(invoice_on(20, 1000.0, None)).await.unwrap();

        let mut cancelled = invoice_on(3, 70.0, None);
        cancelled.archive();
        repo.save(cancelled).await.unwrap();

        let total = repo.total_amount_between(start, end).await.unwrap();
        assert_eq!(total, Some(150.5));
    }

    #[tokio::test]
    async fn test_total_amount_between_empty_range() {
        let repo = InMemoryInvoiceRepository::new();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        repo.save(invoice_on(20, 1000.0, None)).await.unwrap();

        let total = repo
            .total_amount_between(start, start + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(total, None);
    }

    #[tokio::test]
    async fn test_supplier_lookup_joins_invoices() {
        let invoices = InMemoryInvoiceRepository::new();
        let suppliers = InMemorySupplierRepository::new(invoices.clone());

        let supplier = Supplier::new(NewSupplier {
            code: "SUP-1".to_string(),
            label: "Acme".to_string(),
            category: SupplierCategory::Ordinary,
        });
        suppliers.save(supplier.clone()).await.unwrap();

        invoices
            .save(invoice_on(1, 10.0, Some(supplier.id)))
            .await
            .unwrap();
        invoices
            .save(invoice_on(2, 20.0, Some(supplier.id)))
            .await
            .unwrap();
        invoices.save(invoice_on(3, 30.0, None)).await.unwrap();

        let found = suppliers.get_by_id(supplier.id).await.unwrap().unwrap();
        assert_eq!(found.invoices.len(), 2);
        assert!(found
            .invoices
            .iter()
            .all(|i| i.supplier_id == Some(supplier.id)));

        assert!(suppliers.get_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }
}
