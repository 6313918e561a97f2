//! Pagination envelope for list operations.

use serde::{Deserialize, Serialize};

/// One page of results plus pagination metadata.
///
/// `total` and `total_pages` are derived from the total row count in the
/// store, never from the length of the returned page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page from its items and the total row count.
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size as u64) as u32
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// Whether pages beyond this one exist.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
