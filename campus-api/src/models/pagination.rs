//! Limit/offset pagination

use serde::{Deserialize, Serialize};

/// Maximum items per page
pub const MAX_LIMIT: u32 = 100;

/// Default items per page
pub const DEFAULT_LIMIT: u32 = 10;

/// A window into an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Items per page (1..=100)
    pub limit: u32,
    /// Rows skipped before the page starts
    pub offset: u32,
}

impl Page {
    /// Create a page, clamping limit to 1..=100.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// Build a page from optional, possibly negative query values.
    ///
    /// Missing values fall back to the defaults (limit 10, offset 0);
    /// negative values are clamped to the valid range.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit
            .map(|l| l.clamp(1, MAX_LIMIT as i64) as u32)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = offset
            .map(|o| o.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0);
        Self::new(limit, offset)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Paginated response body: `{data, count, limit, offset}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for the current page
    pub data: Vec<T>,
    /// Total matching records across all pages
    pub count: i64,
    /// Effective page size
    pub limit: u32,
    /// Effective offset
    pub offset: u32,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, count: i64, page: Page) -> Self {
        Self {
            data,
            count,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = Page::from_query(None, None);
        assert_eq!(p, Page { limit: 10, offset: 0 });
        assert_eq!(p, Page::default());
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Page::from_query(Some(0), None).limit, 1);
        assert_eq!(Page::from_query(Some(-5), None).limit, 1);
        assert_eq!(Page::from_query(Some(999), None).limit, 100);
        assert_eq!(Page::new(0, 0).limit, 1);
    }

    #[test]
    fn clamps_offset() {
        assert_eq!(Page::from_query(None, Some(-1)).offset, 0);
        assert_eq!(Page::from_query(None, Some(40)).offset, 40);
    }

    #[test]
    fn serializes_echoed_window() {
        let page = Paginated::new(vec!["a"], 7, Page::new(5, 5));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"data": ["a"], "count": 7, "limit": 5, "offset": 5})
        );
    }
}
