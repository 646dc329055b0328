//! Field rules shared by every car resource kind.

use chrono::Datelike;

use crate::cost::Cost;
use crate::validation::Validator;

/// Maximum length of a car name, in bytes.
pub const MAX_NAME_BYTES: usize = 500;

/// The calendar year right now, in UTC.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Record every rule violation for a car's user-supplied fields.
///
/// The year ceiling is the calendar year at the time of the call.
pub fn validate_car(v: &mut Validator, name: &str, year: i32, cost: Cost) {
    validate_car_as_of(v, name, year, cost, current_year());
}

/// Same as [`validate_car`] with an explicit reference year.
pub fn validate_car_as_of(
    v: &mut Validator,
    name: &str,
    year: i32,
    cost: Cost,
    current_year: i32,
) {
    v.check(!name.is_empty(), "name", "must be provided");
    v.check(
        name.len() <= MAX_NAME_BYTES,
        "name",
        "must not be more than 500 bytes long",
    );
    v.check(year != 0, "year", "must be provided");
    v.check(year <= current_year, "year", "must not be in the future");
    v.check(!cost.is_zero(), "cost", "must be provided");
    v.check(cost.units() > 0, "cost", "must be a positive integer");
}
