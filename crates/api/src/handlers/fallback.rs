//! JSON responses for requests that match no handler.

use axum::http::Method;

use crate::error::AppError;

/// Fallback for paths with no matching route.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
