//! Pagination contract shared by every list endpoint.
//!
//! Both services paginate the same way: 1-indexed `page`, `per_page`
//! defaulting to 10, and a `{items, total, pages}` response where
//! `pages = ceil(total / per_page)`. An out-of-range page yields an empty
//! item slice with the correct counts, never an error.

use serde::Serialize;

/// Default page size when the caller does not supply `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Upper bound on `per_page`; larger requests are clamped, not rejected.
pub const MAX_PER_PAGE: i64 = 100;

/// A validated, clamped pagination request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Clamp raw query values into a usable request: `page` floors at 1,
    /// `per_page` floors at 1 and caps at [`MAX_PER_PAGE`].
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the counts the caller needs to iterate.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    /// Assemble a page from a fetched slice and the total matching count.
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + request.per_page - 1) / request.per_page
        };
        Self {
            items,
            total,
            pages,
        }
    }
}
