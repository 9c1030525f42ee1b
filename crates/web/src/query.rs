//! Query-string types shared across list handlers.

use serde::Deserialize;
use tracker_core::page::PageRequest;

/// Generic `?page=&per_page=` pagination parameters.
///
/// Raw values are clamped by [`PageRequest::new`]; handlers never see an
/// invalid page or page size.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
