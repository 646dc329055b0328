//! Route definitions for a car resource.

use axum::routing::get;
use axum::Router;
use carlot_core::resource::Resource;

use crate::handlers::{car, fallback};
use crate::state::AppState;

/// Routes mounted at `/{resource}`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
///
/// Any other method on these paths gets a JSON 405.
pub fn router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(car::list::<R>)
                .post(car::create::<R>)
                .fallback(fallback::method_not_allowed),
        )
        .route(
            "/{id}",
            get(car::get_by_id::<R>)
                .patch(car::update::<R>)
                .delete(car::delete::<R>)
                .fallback(fallback::method_not_allowed),
        )
}
