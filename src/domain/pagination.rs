//! Page arithmetic for the book catalogue

/// Books per catalogue page
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// SQLite binds OFFSET and LIMIT as signed 64-bit integers
const MAX_SQL_BOUND: u64 = i64::MAX as u64;

/// A resolved, 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Resolve a raw `?page=` value. Absent, non-numeric, zero and negative
    /// values all fall back to the first page. There is no upper bound.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map_or(1, |p| p as u64);
        Self::new(page, DEFAULT_PAGE_SIZE)
    }

    /// Number of records to skip: `(page - 1) * page_size`, capped at `i64::MAX`
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(MAX_SQL_BOUND)
    }

    pub fn limit(&self) -> u64 {
        self.page_size.min(MAX_SQL_BOUND)
    }

    /// Whether this page starts at or after the last of `total` records
    pub fn is_past_end(&self, total: u64) -> bool {
        self.offset() >= total
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// `ceil(total / page_size)`
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1))
}
