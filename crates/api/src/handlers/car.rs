//! Handlers for the car resources (`/classic-cars`, `/remote-cars`).
//!
//! Every handler is generic over the [`Resource`] kind; the router
//! instantiates one set per kind.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::Json;
use carlot_core::error::CoreError;
use carlot_core::resource::Resource;
use carlot_core::types::DbId;
use carlot_core::validation::Validator;
use carlot_db::models::car::{Car, CreateCar, UpdateCar};
use carlot_db::repositories::CarRepo;

use crate::error::{AppError, AppResult};
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Optional request header carrying the version the client last read.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// POST /api/v1/{resource}
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<CreateCar>, JsonRejection>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<DataResponse<Car>>)> {
    let Json(input) = payload?;
    let mut car = Car::try_from(input).map_err(CoreError::from)?;
    CarRepo::<R>::insert(&state.pool, &mut car).await?;

    tracing::info!(entity = R::ENTITY, id = car.id, "Record created");
    let location = format!("/api/v1/{}/{}", R::PATH, car.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(DataResponse { data: car }),
    ))
}

/// GET /api/v1/{resource}
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse<Car>>> {
    let mut v = Validator::new();
    let (name, filters) = params.into_filters(R::SORT_SAFELIST, &mut v);
    filters.validate(&mut v);
    v.into_result().map_err(CoreError::Validation)?;

    let (cars, metadata) = CarRepo::<R>::list(&state.pool, &name, &filters).await?;
    Ok(Json(ListResponse {
        data: cars,
        metadata,
    }))
}

/// GET /api/v1/{resource}/{id}
///
/// An id that is not an integer is reported as not found.
pub async fn get_by_id<R: Resource>(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<Car>>> {
    let Path(id) = path?;
    let car = CarRepo::<R>::get(&state.pool, id).await?;
    Ok(Json(DataResponse { data: car }))
}

/// PATCH /api/v1/{resource}/{id}
///
/// Fetches the record, applies the fields present in the body and writes
/// it back conditioned on the fetched version. If the client sends
/// `X-Expected-Version` and it differs from the stored version, the update
/// is refused as an edit conflict before anything is written.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<UpdateCar>, JsonRejection>,
) -> AppResult<Json<DataResponse<Car>>> {
    let Path(id) = path?;
    let mut car = CarRepo::<R>::get(&state.pool, id).await?;

    if let Some(expected) = expected_version(&headers)? {
        if expected != car.version {
            return Err(CoreError::EditConflict {
                entity: R::ENTITY,
                id,
            }
            .into());
        }
    }

    let Json(input) = payload?;
    input.apply_to(&mut car).map_err(CoreError::from)?;
    CarRepo::<R>::update(&state.pool, &mut car).await?;

    tracing::info!(entity = R::ENTITY, id, version = car.version, "Record updated");
    Ok(Json(DataResponse { data: car }))
}

/// DELETE /api/v1/{resource}/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    CarRepo::<R>::delete(&state.pool, id).await?;
    tracing::info!(entity = R::ENTITY, id, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn expected_version(headers: &HeaderMap) -> AppResult<Option<i32>> {
    let Some(value) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .map(Some)
        .ok_or_else(|| {
            AppError::BadRequest(format!("{EXPECTED_VERSION_HEADER} must be an integer"))
        })
}
