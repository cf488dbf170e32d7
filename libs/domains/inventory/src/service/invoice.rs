//! Invoice Service - cancellation, operator assignment and reporting

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EntityKind, InventoryError, InventoryResult};
use crate::models::{Invoice, Operator};
use crate::repository::{InvoiceRepository, OperatorRepository, SupplierRepository};

/// Invoice service
///
/// Reads invoices directly and reaches them through their operator and
/// supplier relations.
pub struct InvoiceService<I, O, S>
where
    I: InvoiceRepository,
    O: OperatorRepository,
    S: SupplierRepository,
{
    invoices: Arc<I>,
    operators: Arc<O>,
    suppliers: Arc<S>,
}

impl<I, O, S> InvoiceService<I, O, S>
where
    I: InvoiceRepository,
    O: OperatorRepository,
    S: SupplierRepository,
{
    pub fn new(invoices: I, operators: O, suppliers: S) -> Self {
        Self {
            invoices: Arc::new(invoices),
            operators: Arc::new(operators),
            suppliers: Arc::new(suppliers),
        }
    }

    #[instrument(skip(self))]
    pub async fn retrieve_all_invoices(&self) -> InventoryResult<Vec<Invoice>> {
        self.invoices.list().await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_invoice(&self, id: Uuid) -> InventoryResult<Invoice> {
        self.invoices
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Invoice, id))
    }

    /// Archive an invoice. Cancelling an archived invoice saves it again
    /// unchanged apart from its modification date.
    #[instrument(skip(self))]
    pub async fn cancel_invoice(&self, id: Uuid) -> InventoryResult<Invoice> {
        let mut invoice = self.retrieve_invoice(id).await?;

        if invoice.archived {
            tracing::debug!(invoice_id = %id, "Invoice already archived");
        }
        invoice.archive();

        self.invoices.save(invoice).await
    }

    /// Invoices issued by a supplier
    #[instrument(skip(self))]
    pub async fn get_invoices_by_supplier(
        &self,
        supplier_id: Uuid,
    ) -> InventoryResult<Vec<Invoice>> {
        let supplier = self
            .suppliers
            .get_by_id(supplier_id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Supplier, supplier_id))?;

        Ok(supplier.invoices)
    }

    /// Hand an invoice to an operator
    ///
    /// Both sides of the relation are persisted: the operator's assignment set
    /// and the invoice's `operator_id`. An invoice moving between operators is
    /// also removed from its previous operator.
    #[instrument(skip(self))]
    pub async fn assign_operator_to_invoice(
        &self,
        invoice_id: Uuid,
        operator_id: Uuid,
    ) -> InventoryResult<Operator> {
        let mut invoice = self.retrieve_invoice(invoice_id).await?;

        let mut operator = self
            .operators
            .get_by_id(operator_id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Operator, operator_id))?;

        if !operator.assign_invoice(invoice.id) {
            tracing::debug!(%invoice_id, %operator_id, "Invoice already assigned to operator");
        }
        let operator = self.operators.save(operator).await?;

        if let Some(previous_id) = invoice.assign_operator(operator_id) {
            if previous_id != operator_id {
                self.release_invoice(previous_id, invoice_id).await?;
            }
        }
        self.invoices.save(invoice).await?;

        Ok(operator)
    }

    async fn release_invoice(&self, operator_id: Uuid, invoice_id: Uuid) -> InventoryResult<()> {
        match self.operators.get_by_id(operator_id).await? {
            Some(mut previous) => {
                if previous.unassign_invoice(invoice_id) {
                    self.operators.save(previous).await?;
                }
            }
            None => {
                tracing::debug!(%operator_id, %invoice_id, "Previous operator no longer exists");
            }
        }
        Ok(())
    }

    /// Total amount of invoices issued between `start` and `end` (inclusive)
    #[instrument(skip(self))]
    pub async fn get_total_amount_invoice_between_dates(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> InventoryResult<f64> {
        let total = self.invoices.total_amount_between(start, end).await?;
        Ok(total.unwrap_or(0.0))
    }
}

impl<I, O, S> Clone for InvoiceService<I, O, S>
where
    I: InvoiceRepository,
    O: OperatorRepository,
    S: SupplierRepository,
{
    fn clone(&self) -> Self {
        Self {
            invoices: Arc::clone(&self.invoices),
            operators: Arc::clone(&self.operators),
            suppliers: Arc::clone(&self.suppliers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewInvoice, NewOperator, NewSupplier, Supplier, SupplierCategory};
    use crate::repository::{MockInvoiceRepository, MockOperatorRepository, MockSupplierRepository};
    use chrono::Duration;
    use mockall::predicate::eq;

    fn invoice() -> Invoice {
        Invoice::new(NewInvoice {
            amount: 1000.0,
            amount_discount: 0.0,
            date_creation: Utc::now(),
            supplier_id: None,
        })
    }

    fn operator() -> Operator {
        Operator::new(NewOperator {
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
        })
    }

    fn service(
        invoices: MockInvoiceRepository,
        operators: MockOperatorRepository,
        suppliers: MockSupplierRepository,
    ) -> InvoiceService<MockInvoiceRepository, MockOperatorRepository, MockSupplierRepository> {
        InvoiceService::new(invoices, operators, suppliers)
    }

    #[tokio::test]
    async fn test_retrieve_all_invoices() {
        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![invoice(), invoice()]));

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );
        let all = service.retrieve_all_invoices().await.unwrap();

        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_retrieve_invoice() {
        let existing = invoice();
        let id = existing.id;

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );

        assert_eq!(service.retrieve_invoice(id).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_cancel_invoice_archives_and_saves_once() {
        let existing = invoice();
        let id = existing.id;

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        invoices
            .expect_save()
            .withf(move |invoice| invoice.id == id && invoice.archived)
            .times(1)
            .returning(Ok);

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );
        let cancelled = service.cancel_invoice(id).await.unwrap();

        assert!(cancelled.archived);
    }

    #[tokio::test]
    async fn test_cancel_archived_invoice_still_saves() {
        let mut existing = invoice();
        existing.archive();
        let id = existing.id;

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .times(2)
            .returning(move |_| Ok(Some(existing.clone())));
        invoices
            .expect_save()
            .withf(|invoice| invoice.archived)
            .times(2)
            .returning(Ok);

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );

        assert!(service.cancel_invoice(id).await.unwrap().archived);
        assert!(service.cancel_invoice(id).await.unwrap().archived);
    }

    #[tokio::test]
    async fn test_cancel_invoice_not_found() {
        let mut invoices = MockInvoiceRepository::new();
        invoices.expect_get_by_id().returning(|_| Ok(None));
        invoices.expect_save().never();

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );
        let err = service.cancel_invoice(Uuid::now_v7()).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Invoice not found");
    }

    #[tokio::test]
    async fn test_get_invoices_by_supplier() {
        let mut supplier = Supplier::new(NewSupplier {
            code: "SUP-1".to_string(),
            label: "Acme".to_string(),
            category: SupplierCategory::Ordinary,
        });
        supplier.invoices = vec![invoice()];
        let supplier_id = supplier.id;

        let mut suppliers = MockSupplierRepository::new();
        suppliers
            .expect_get_by_id()
            .with(eq(supplier_id))
            .times(1)
            .returning(move |_| Ok(Some(supplier.clone())));

        let service = service(
            MockInvoiceRepository::new(),
            MockOperatorRepository::new(),
            suppliers,
        );
        let found = service.get_invoices_by_supplier(supplier_id).await.unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_get_invoices_by_unknown_supplier() {
        let mut suppliers = MockSupplierRepository::new();
        suppliers.expect_get_by_id().returning(|_| Ok(None));

        let service = service(
            MockInvoiceRepository::new(),
            MockOperatorRepository::new(),
            suppliers,
        );
        let err = service
            .get_invoices_by_supplier(Uuid::now_v7())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Supplier not found");
    }

    #[tokio::test]
    async fn test_assign_operator_to_invoice() {
        let invoice = invoice();
        let invoice_id = invoice.id;
        let operator = operator();
        let operator_id = operator.id;

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .with(eq(invoice_id))
            .returning(move |_| Ok(Some(invoice.clone())));
        invoices
            .expect_save()
            .withf(move |invoice| invoice.operator_id == Some(operator_id))
            .times(1)
            .returning(Ok);

        let mut operators = MockOperatorRepository::new();
        operators
            .expect_get_by_id()
            .with(eq(operator_id))
            .returning(move |_| Ok(Some(operator.clone())));
        operators
            .expect_save()
            .withf(move |operator| operator.invoices.contains(&invoice_id))
            .times(1)
            .returning(Ok);

        let service = service(invoices, operators, MockSupplierRepository::new());
        let saved = service
            .assign_operator_to_invoice(invoice_id, operator_id)
            .await
            .unwrap();

        assert!(saved.invoices.contains(&invoice_id));
    }

    #[tokio::test]
    async fn test_reassign_invoice_releases_previous_operator() {
        let mut previous = operator();
        let previous_id = previous.id;
        let mut invoice = invoice();
        let invoice_id = invoice.id;
        previous.assign_invoice(invoice_id);
        invoice.assign_operator(previous_id);
        let next = operator();
        let next_id = next.id;

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .returning(move |_| Ok(Some(invoice.clone())));
        invoices
            .expect_save()
            .withf(move |invoice| invoice.operator_id == Some(next_id))
            .times(1)
            .returning(Ok);

        let mut operators = MockOperatorRepository::new();
        operators
            .expect_get_by_id()
            .with(eq(next_id))
            .returning(move |_| Ok(Some(next.clone())));
        operators
            .expect_get_by_id()
            .with(eq(previous_id))
            .times(1)
            .returning(move |_| Ok(Some(previous.clone())));
        operators
            .expect_save()
            .withf(move |operator| {
                operator.id == next_id && operator.invoices.contains(&invoice_id)
            })
            .times(1)
            .returning(Ok);
        operators
            .expect_save()
            .withf(move |operator| operator.id == previous_id && operator.invoices.is_empty())
            .times(1)
            .returning(Ok);

        let service = service(invoices, operators, MockSupplierRepository::new());
        service
            .assign_operator_to_invoice(invoice_id, next_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_assign_operator_twice_keeps_single_entry() {
        let mut invoice = invoice();
        let invoice_id = invoice.id;
        let mut operator = operator();
        let operator_id = operator.id;
        operator.assign_invoice(invoice_id);
        invoice.assign_operator(operator_id);

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .returning(move |_| Ok(Some(invoice.clone())));
        invoices.expect_save().times(1).returning(Ok);

        let mut operators = MockOperatorRepository::new();
        operators
            .expect_get_by_id()
            .returning(move |_| Ok(Some(operator.clone())));
        operators.expect_save().times(1).returning(Ok);

        let service = service(invoices, operators, MockSupplierRepository::new());
        let saved = service
            .assign_operator_to_invoice(invoice_id, operator_id)
            .await
            .unwrap();

        assert_eq!(saved.invoices.len(), 1);
    }

    #[tokio::test]
    async fn test_assign_unknown_operator() {
        let invoice = invoice();
        let invoice_id = invoice.id;

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_get_by_id()
            .returning(move |_| Ok(Some(invoice.clone())));
        invoices.expect_save().never();

        let mut operators = MockOperatorRepository::new();
        operators.expect_get_by_id().returning(|_| Ok(None));
        operators.expect_save().never();

        let service = service(invoices, operators, MockSupplierRepository::new());
        let err = service
            .assign_operator_to_invoice(invoice_id, Uuid::now_v7())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Operator not found");
    }

    #[tokio::test]
    async fn test_get_total_amount_invoice_between_dates() {
        let start = Utc::now();
        let end = start + Duration::days(30);

        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_total_amount_between()
            .with(eq(start), eq(end))
            .times(1)
            .returning(|_, _| Ok(Some(1000.0)));

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );
        let total = service
            .get_total_amount_invoice_between_dates(start, end)
            .await
            .unwrap();

        assert_eq!(total, 1000.0);
    }

    #[tokio::test]
    async fn test_get_total_amount_without_invoices_is_zero() {
        let mut invoices = MockInvoiceRepository::new();
        invoices
            .expect_total_amount_between()
            .returning(|_, _| Ok(None));

        let service = service(
            invoices,
            MockOperatorRepository::new(),
            MockSupplierRepository::new(),
        );
        let now = Utc::now();
        let total = service
            .get_total_amount_invoice_between_dates(now, now)
            .await
            .unwrap();

        assert_eq!(total, 0.0);
    }
}
