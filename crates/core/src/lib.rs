//! Domain logic for the car catalog service.
//!
//! Everything here is pure: no database or HTTP dependencies. The storage
//! layer (`carlot-db`) and the HTTP layer (`carlot-api`) build on these types.

pub mod car;
pub mod cost;
pub mod error;
pub mod filters;
pub mod resource;
pub mod types;
pub mod validation;
