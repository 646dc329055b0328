use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::handlers::fallback;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answered, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered within the store deadline.
    pub db_healthy: bool,
    /// Newest applied migration, absent when it could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<i64>,
}

/// GET /health -- database reachability and schema version.
///
/// Both queries share the per-operation store deadline, so a hung database
/// reports `degraded` instead of stalling the check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match carlot_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let schema_version = if db_healthy {
        carlot_db::schema_version(&state.pool).await.ok().flatten()
    } else {
        None
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/health",
        get(health_check).fallback(fallback::method_not_allowed),
    )
}
