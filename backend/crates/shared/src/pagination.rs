//! Pagination Cursor
//!
//! Page-number based pagination shared by every list operation. The store
//! records the total row count back into the cursor so callers can compute
//! page counts without a second query.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size accepted from the outside
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination cursor
///
/// `page` is 1-based. A page below 1 is clamped to 1 rather than rejected,
/// so `offset()` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: i64,
    /// Number of rows per page
    pub size: i64,
    /// Total row count, filled in by the store on list operations
    #[serde(default)]
    pub total: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

impl Pagination {
    /// Create a cursor, clamping out-of-range values
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
            total: 0,
        }
    }

    /// Row offset for the current page
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.size
    }

    /// Row limit for the current page
    #[inline]
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Record the total row count (side effect of list operations)
    #[inline]
    pub fn set_total(&mut self, total: i64) {
        self.total = total;
    }

    /// Number of pages implied by the recorded total
    pub fn page_count(&self) -> i64 {
        if self.size <= 0 {
            return 0;
        }
        (self.total + self.size - 1) / self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_page_below_one_is_clamped() {
        assert_eq!(Pagination::new(0, 10).offset(), 0);
        assert_eq!(Pagination::new(-5, 10).offset(), 0);

        // A deserialized cursor can still carry page 0; offset stays safe.
        let raw = Pagination {
            page: 0,
            size: 10,
            total: 0,
        };
        assert_eq!(raw.offset(), 0);
    }

    #[test]
    fn test_size_clamped() {
        assert_eq!(Pagination::new(1, 0).size, 1);
        assert_eq!(Pagination::new(1, 10_000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_count() {
        let mut p = Pagination::new(1, 10);
        p.set_total(15);
        assert_eq!(p.page_count(), 2);

        p.set_total(0);
        assert_eq!(p.page_count(), 0);

        p.set_total(30);
        assert_eq!(p.page_count(), 3);
    }
}
