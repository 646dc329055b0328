//! Shared query parameter types for API handlers.

use carlot_core::filters::{Filters, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT};
use carlot_core::validation::Validator;
use serde::Deserialize;

/// Listing parameters (`?name=&page=&page_size=&sort=`).
///
/// Numbers are kept as raw strings so that a non-numeric value becomes a
/// field-level validation error instead of an opaque extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Split into the name query and [`Filters`] for `sort_safelist`.
    ///
    /// Unparseable numbers are recorded on `v` and replaced by their default.
    pub fn into_filters(
        self,
        sort_safelist: &'static [&'static str],
        v: &mut Validator,
    ) -> (String, Filters) {
        let filters = Filters {
            page: read_int(self.page, "page", DEFAULT_PAGE, v),
            page_size: read_int(self.page_size, "page_size", DEFAULT_PAGE_SIZE, v),
            sort: self.sort.unwrap_or_else(|| DEFAULT_SORT.to_string()),
            sort_safelist,
        };
        (self.name.unwrap_or_default(), filters)
    }
}

fn read_int(raw: Option<String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match raw.as_deref() {
        None | Some("") => default,
        Some(text) => text.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
    }
}
