pub mod cars;
pub mod health;

use axum::Router;
use carlot_core::resource::{ClassicCars, RemoteCars, Resource};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /classic-cars                 list, create
/// /classic-cars/{id}            get, partial update, delete
///
/// /remote-cars                  list, create
/// /remote-cars/{id}             get, partial update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(&format!("/{}", ClassicCars::PATH), cars::router::<ClassicCars>())
        .nest(&format!("/{}", RemoteCars::PATH), cars::router::<RemoteCars>())
}
