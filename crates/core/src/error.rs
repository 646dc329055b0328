use crate::cost::CostError;
use crate::types::DbId;
use crate::validation::ValidationErrors;

/// Domain-level failures, independent of storage and transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Edit conflict on {entity} with id {id}")]
    EditConflict { entity: &'static str, id: DbId },

    #[error(transparent)]
    InvalidFormat(#[from] CostError),
}
