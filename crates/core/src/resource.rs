//! Resource kinds served by the catalog.
//!
//! Classic cars and remote cars share one record shape and one set of
//! operations. A [`Resource`] implementor tags which table and safelist a
//! generic repository or handler works against.

/// Sort values accepted for every car listing.
pub const CAR_SORT_SAFELIST: &[&str] = &[
    "id", "name", "year", "cost", "-id", "-name", "-year", "-cost",
];

/// Static description of one resource kind.
///
/// All values are compile-time constants. `TABLE` is interpolated into SQL
/// text, so it must never be derived from caller input.
pub trait Resource: Send + Sync + 'static {
    /// Human-readable label used in logs and error messages.
    const ENTITY: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// URL path segment under `/api/v1`.
    const PATH: &'static str;
    /// Exact-match list of accepted `sort` values.
    const SORT_SAFELIST: &'static [&'static str];
}

/// The `classic_cars` resource.
#[derive(Debug, Clone, Copy)]
pub struct ClassicCars;

impl Resource for ClassicCars {
    const ENTITY: &'static str = "ClassicCar";
    const TABLE: &'static str = "classic_cars";
    const PATH: &'static str = "classic-cars";
    const SORT_SAFELIST: &'static [&'static str] = CAR_SORT_SAFELIST;
}

/// The `remote_cars` resource.
#[derive(Debug, Clone, Copy)]
pub struct RemoteCars;

impl Resource for RemoteCars {
    const ENTITY: &'static str = "RemoteCar";
    const TABLE: &'static str = "remote_cars";
    const PATH: &'static str = "remote-cars";
    const SORT_SAFELIST: &'static [&'static str] = CAR_SORT_SAFELIST;
}
