//! Repository for the car tables (`classic_cars`, `remote_cars`).
//!
//! The table and sort safelist come from the [`Resource`] type parameter.
//! Updates use optimistic concurrency: the `UPDATE` matches on both `id` and
//! the version the caller last read, so of several writers holding the same
//! version at most one succeeds and the rest see an edit conflict.

use std::marker::PhantomData;

use carlot_core::error::CoreError;
use carlot_core::filters::{Filters, Metadata};
use carlot_core::resource::{ClassicCars, RemoteCars, Resource};
use carlot_core::types::{DbId, Timestamp};
use carlot_core::validation::Validator;
use sqlx::{FromRow, PgPool};

use crate::deadline::{with_deadline, OPERATION_TIMEOUT};
use crate::error::StoreError;
use crate::models::car::Car;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, name, year, cost, description, version";

/// A listing row: the car plus the size of the whole filtered set.
#[derive(FromRow)]
struct CarListRow {
    total_records: i64,
    #[sqlx(flatten)]
    car: Car,
}

/// Provides CRUD operations for one car resource kind.
pub struct CarRepo<R>(PhantomData<R>);

pub type ClassicCarRepo = CarRepo<ClassicCars>;
pub type RemoteCarRepo = CarRepo<RemoteCars>;

impl<R: Resource> CarRepo<R> {
    /// Insert a validated car and fill in its `id`, `created_at` and `version`.
    pub async fn insert(pool: &PgPool, car: &mut Car) -> Result<(), StoreError> {
        validate(car)?;

        let query = format!(
            "INSERT INTO {} (name, year, cost, description)
             VALUES ($1, $2, $3, $4)
             RETURNING id, created_at, version",
            R::TABLE
        );
        let (id, created_at, version) = with_deadline(
            OPERATION_TIMEOUT,
            R::ENTITY,
            "insert",
            sqlx::query_as::<_, (DbId, Timestamp, i32)>(&query)
                .bind(&car.name)
                .bind(car.year)
                .bind(car.cost.units())
                .bind(&car.description)
                .fetch_one(pool),
        )
        .await?;

        car.id = id;
        car.created_at = created_at;
        car.version = version;
        tracing::debug!(entity = R::ENTITY, id, "Inserted record");
        Ok(())
    }

    /// Fetch a car by ID.
    ///
    /// IDs below 1 are rejected without touching the database.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Car, StoreError> {
        if id < 1 {
            return Err(not_found::<R>(id));
        }

        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", R::TABLE);
        with_deadline(
            OPERATION_TIMEOUT,
            R::ENTITY,
            "get",
            sqlx::query_as::<_, Car>(&query).bind(id).fetch_optional(pool),
        )
        .await?
        .ok_or_else(|| not_found::<R>(id))
    }

    /// Write a validated car back, conditioned on `car.version`.
    ///
    /// On success the version is bumped by one, stored on `car` and returned.
    /// If no row matches the id and version pair the call fails with an edit
    /// conflict: the record was changed or deleted since it was read.
    pub async fn update(pool: &PgPool, car: &mut Car) -> Result<i32, StoreError> {
        validate(car)?;

        let query = format!(
            "UPDATE {} SET
                name = $1,
                year = $2,
                cost = $3,
                description = $4,
                version = version + 1
             WHERE id = $5 AND version = $6
             RETURNING version",
            R::TABLE
        );
        let version = with_deadline(
            OPERATION_TIMEOUT,
            R::ENTITY,
            "update",
            sqlx::query_scalar::<_, i32>(&query)
                .bind(&car.name)
                .bind(car.year)
                .bind(car.cost.units())
                .bind(&car.description)
                .bind(car.id)
                .bind(car.version)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(CoreError::EditConflict {
            entity: R::ENTITY,
            id: car.id,
        })?;

        car.version = version;
        tracing::debug!(entity = R::ENTITY, id = car.id, version, "Updated record");
        Ok(version)
    }

    /// Permanently delete a car by ID.
    ///
    /// IDs below 1 are rejected without touching the database. Deleting a
    /// row that does not exist (or no longer exists) is a not-found error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        if id < 1 {
            return Err(not_found::<R>(id));
        }

        let query = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = with_deadline(
            OPERATION_TIMEOUT,
            R::ENTITY,
            "delete",
            sqlx::query(&query).bind(id).execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<R>(id));
        }
        tracing::debug!(entity = R::ENTITY, id, "Deleted record");
        Ok(())
    }

    /// List one page of cars whose name matches `name`, plus page metadata.
    ///
    /// An empty `name` matches every row. Rows are ordered by the resolved
    /// sort column, then by `id ASC` so equal sort keys keep a stable order.
    /// `total_records` is a window count over the same filtered scan.
    pub async fn list(
        pool: &PgPool,
        name: &str,
        filters: &Filters,
    ) -> Result<(Vec<Car>, Metadata), StoreError> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        v.into_result()?;

        let column = filters.sort_column().ok_or_else(|| {
            let mut v = Validator::new();
            v.add_error("sort", "invalid sort value");
            StoreError::from(v.into_errors())
        })?;
        let direction = filters.sort_direction().as_sql();

        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM {}
             WHERE (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1) OR $1 = '')
             ORDER BY {column} {direction}, id ASC
             LIMIT $2 OFFSET $3",
            R::TABLE
        );
        let rows = with_deadline(
            OPERATION_TIMEOUT,
            R::ENTITY,
            "list",
            sqlx::query_as::<_, CarListRow>(&query)
                .bind(name)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(pool),
        )
        .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        tracing::debug!(entity = R::ENTITY, total_records, page = filters.page, "Listed records");
        let metadata = Metadata::calculate(total_records, filters.page, filters.page_size);
        let cars = rows.into_iter().map(|row| row.car).collect();
        Ok((cars, metadata))
    }
}

fn validate(car: &Car) -> Result<(), StoreError> {
    let mut v = Validator::new();
    car.validate(&mut v);
    Ok(v.into_result()?)
}

fn not_found<R: Resource>(id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}
