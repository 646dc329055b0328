//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod car_repo;

pub use car_repo::{CarRepo, ClassicCarRepo, RemoteCarRepo};
