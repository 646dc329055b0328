//! Shared response envelope types for API handlers.
//!
//! Single records use a `{ "data": ... }` envelope; listings add a
//! `"metadata"` object describing the page.

use carlot_core::filters::Metadata;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "metadata": {...} }` envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub metadata: Metadata,
}
