//! Per-operation deadline for repository statements.

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

/// Upper bound on a single repository operation.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Drive `fut` to completion or give up after `limit`.
///
/// On expiry the in-flight future is dropped, which cancels the statement,
/// and the caller gets [`StoreError::Timeout`].
pub async fn with_deadline<T, F>(
    limit: Duration,
    entity: &'static str,
    operation: &'static str,
    fut: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => {
            tracing::warn!(entity, operation, ?limit, "Store operation timed out");
            Err(StoreError::Timeout { entity, operation })
        }
    }
}
