use carlot_core::error::CoreError;
use carlot_core::validation::ValidationErrors;

/// Failure of a single repository operation.
///
/// Every operation returns either its value or exactly one of these. Nothing
/// is retried inside the repository; retrying after an edit conflict is up
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Domain-level failure (validation, not found, edit conflict).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The statement did not finish within its deadline.
    #[error("{entity} {operation} timed out")]
    Timeout {
        entity: &'static str,
        operation: &'static str,
    },

    /// Any other database failure: connectivity, constraints, row shape.
    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Core(CoreError::Validation(errors))
    }
}
