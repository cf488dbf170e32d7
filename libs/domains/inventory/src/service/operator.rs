use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EntityKind, InventoryError, InventoryResult};
use crate::models::{NewOperator, Operator};
use crate::repository::OperatorRepository;

/// Operator service
pub struct OperatorService<R: OperatorRepository> {
    repository: Arc<R>,
}

impl<R: OperatorRepository> OperatorService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn add_operator(&self, input: NewOperator) -> InventoryResult<Operator> {
        input
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        self.repository.save(Operator::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_operator(&self, id: Uuid) -> InventoryResult<Operator> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(EntityKind::Operator, id))
    }

    #[instrument(skip(self))]
    pub async fn retrieve_all_operators(&self) -> InventoryResult<Vec<Operator>> {
        self.repository.list().await
    }

    /// Persist changes to an operator (name or assignments)
    #[instrument(skip(self, operator), fields(operator_id = %operator.id))]
    pub async fn update_operator(&self, operator: Operator) -> InventoryResult<Operator> {
        self.repository.save(operator).await
    }

    /// Delete an operator; unknown ids are ignored
    #[instrument(skip(self))]
    pub async fn delete_operator(&self, id: Uuid) -> InventoryResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(operator_id = %id, "Nothing to delete");
        }
        Ok(())
    }
}

impl<R: OperatorRepository> Clone for OperatorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
