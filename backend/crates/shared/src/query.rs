//! List Query Primitives
//!
//! Sorting, skip/limit pagination and the total-count header shared by every
//! list endpoint (`/products`, `/orders`).

use crate::error::app_error::{AppError, AppResult};

/// Response header carrying the filtered, unpaginated total
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Sort direction from the `_order` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "1" => Ok(Self::Asc),
            "desc" | "descending" | "-1" => Ok(Self::Desc),
            other => Err(AppError::bad_request(format!("Invalid sort order: {other}"))
                .with_action("Use _order=asc or _order=desc")),
        }
    }

    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Apply the direction to an ascending comparison
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// One page of a list, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> AppResult<Self> {
        if page == 0 {
            return Err(AppError::bad_request("_page must be at least 1"));
        }
        if limit == 0 {
            return Err(AppError::bad_request("_limit must be at least 1"));
        }
        Ok(Self { page, limit })
    }

    /// Pagination only applies when both `_page` and `_limit` are present.
    /// The limit is clamped to `max_limit`.
    pub fn from_params(
        page: Option<u32>,
        limit: Option<u32>,
        max_limit: u32,
    ) -> AppResult<Option<Self>> {
        match (page, limit) {
            (Some(page), Some(limit)) => Self::new(page, limit.min(max_limit)).map(Some),
            _ => Ok(None),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Skip/take over an already filtered and sorted list
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .into_iter()
            .skip(offset)
            .take(self.limit as usize)
            .collect()
    }
}

/// A page of results plus the total of the filtered set
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Split a comma separated query value (`category=a,b`) into its members.
/// `None` when the parameter is absent or blank. A value with no non-blank
/// members (`category=,`) yields an empty set that matches nothing.
pub fn split_list(value: Option<&str>) -> Option<Vec<String>> {
    value.filter(|v| !v.trim().is_empty()).map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}
