use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use carlot_core::error::CoreError;
use carlot_db::StoreError;
use serde_json::json;

/// Message returned to clients whose update lost an optimistic-concurrency race.
pub const EDIT_CONFLICT_MESSAGE: &str =
    "unable to update the record due to an edit conflict, please try again";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`StoreError`] for domain and storage failures
/// and adds HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `carlot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `carlot_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or record matches the request path.
    #[error("Resource not found")]
    NotFound,

    /// The path exists but does not support the request method.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Unparseable path parameter");
        AppError::NotFound
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => core_error_response(core),
            AppError::Store(StoreError::Core(core)) => core_error_response(core),
            AppError::Store(StoreError::Timeout { entity, operation }) => {
                tracing::error!(entity, operation, "Store operation timed out");
                internal_error_response()
            }
            AppError::Store(StoreError::Storage(err)) => {
                tracing::error!(error = %err, "Database error");
                internal_error_response()
            }
            AppError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound => error_body(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "the requested resource could not be found",
            ),
            AppError::MethodNotAllowed(method) => error_body(
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                format!("the {method} method is not supported for this resource"),
            ),
        }
    }
}

fn core_error_response(err: CoreError) -> Response {
    match err {
        CoreError::NotFound { entity, id } => error_body(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(fields) => {
            let body = json!({
                "error": "Validation failed",
                "code": "VALIDATION_ERROR",
                "fields": fields,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
        }
        CoreError::EditConflict { .. } => {
            error_body(StatusCode::CONFLICT, "EDIT_CONFLICT", EDIT_CONFLICT_MESSAGE)
        }
        CoreError::InvalidFormat(err) => {
            error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
        }
    }
}

fn internal_error_response() -> Response {
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred",
    )
}

fn error_body(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    let body = json!({
        "error": message.into(),
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}
