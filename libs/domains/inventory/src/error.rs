use strum::Display;
use thiserror::Error;
use uuid::Uuid;

/// Entity kinds that can be looked up by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntityKind {
    Product,
    Stock,
    Invoice,
    Operator,
    Supplier,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{entity} not found")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

impl InventoryError {
    pub fn not_found(entity: EntityKind, id: Uuid) -> Self {
        InventoryError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound { .. })
    }
}
