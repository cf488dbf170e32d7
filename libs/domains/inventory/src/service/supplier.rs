use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EntityKind, InventoryError, InventoryResult};
use crate::models::{NewSupplier, Supplier};
use crate::repository::SupplierRepository;

/// Supplier service
pub struct SupplierService<R: SupplierRepository> {
    repository: Arc<R>,
}

impl<R: SupplierRepository> SupplierService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(supplier_code = %input.code))]
    pub async fn add_supplier(&self, input: NewSupplier) -> InventoryResult<Supplier> {
        input
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        self.repository.save(Supplier::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_supplier(&self, id: Uuid) -> InventoryResult<Supplier> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Supplier, id))
    }

    #[instrument(skip(self))]
    pub async fn retrieve_all_suppliers(&self) -> InventoryResult<Vec<Supplier>> {
        self.repository.list().await
    }

    #[instrument(skip(self, supplier), fields(supplier_id = %supplier.id))]
    pub async fn update_supplier(&self, supplier: Supplier) -> InventoryResult<Supplier> {
        self.repository.save(supplier).await
    }

    /// Delete a supplier; unknown ids are ignored
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: Uuid) -> InventoryResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(supplier_id = %id, "Nothing to delete");
        }
        Ok(())
    }
}

impl<R: SupplierRepository> Clone for SupplierService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
