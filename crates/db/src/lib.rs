//! Persistence layer for the car catalog.
//!
//! Exposes the connection pool helpers, the row models and the repositories.

use sqlx::postgres::PgPoolOptions;

pub mod deadline;
pub mod error;
pub mod models;
pub mod repositories;

pub use deadline::OPERATION_TIMEOUT;
pub use error::StoreError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query within [`OPERATION_TIMEOUT`].
pub async fn health_check(pool: &DbPool) -> Result<(), StoreError> {
    deadline::with_deadline(OPERATION_TIMEOUT, "Database", "health_check", async {
        sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
    })
    .await
}

/// Version of the newest successfully applied migration, if any.
pub async fn schema_version(pool: &DbPool) -> Result<Option<i64>, StoreError> {
    deadline::with_deadline(OPERATION_TIMEOUT, "Database", "schema_version", async {
        sqlx::query_scalar("SELECT max(version) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await
    })
    .await
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
