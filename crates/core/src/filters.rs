//! Pagination and sort parameters for listing endpoints.
//!
//! The sort value is the only caller-controlled input that ends up in SQL
//! text: column names and directions cannot be bound as placeholders. It is
//! only ever resolved through an exact-match lookup in the resource's
//! safelist, and the text that reaches the query is the matched safelist
//! entry, never the caller's string.

use serde::Serialize;

use crate::validation::{permitted_value, Validator};

/// Default page when `?page=` is absent.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size when `?page_size=` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Default sort when `?sort=` is absent.
pub const DEFAULT_SORT: &str = "id";

/// Highest page number a caller may request.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sort order of the primary sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Request-scoped listing parameters. Never persisted.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Column name, optionally prefixed with `-` for descending order.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Filters with the default page, page size and sort.
    pub fn new(sort_safelist: &'static [&'static str]) -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
            sort_safelist,
        }
    }

    /// Record every rule violation on `v`.
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(
            self.page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );
        v.check(
            permitted_value(self.sort.as_str(), self.sort_safelist),
            "sort",
            "invalid sort value",
        );
    }

    /// Bare column name for `ORDER BY`, taken from the matched safelist entry.
    ///
    /// Returns `None` if the sort value is not on the safelist, or if the
    /// stripped column is not itself a safelist entry.
    pub fn sort_column(&self) -> Option<&'static str> {
        let entry = self
            .sort_safelist
            .iter()
            .copied()
            .find(|entry| *entry == self.sort)?;
        let column = entry.strip_prefix('-').unwrap_or(entry);
        permitted_value(column, self.sort_safelist).then_some(column)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Position of a result page within the full filtered set.
///
/// Every field is zero when the filtered set is empty. Zero fields are
/// omitted from the JSON form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl Metadata {
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records == 0 || page_size <= 0 {
            return Self::default();
        }
        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}
