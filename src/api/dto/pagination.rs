//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::application::services::user_service::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// `?page=&limit=` for list endpoints.
///
/// Values are only parsed here; out-of-range numbers are clamped by the
/// service rather than rejected. An empty value (`?page=`) counts as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
