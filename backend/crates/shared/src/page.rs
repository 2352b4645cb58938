//! Pagination
//!
//! 1-based page numbers. A page query that is not a number falls back to the
//! first page; a number outside `1..=total_pages` falls back to the last page.
//! There is always at least one (possibly empty) page.

use serde::Serialize;

/// Requested page, before the total is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    requested: Requested,
    per_page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requested {
    First,
    Number(i64),
}

impl PageRequest {
    /// First page.
    pub fn first(per_page: u32) -> Self {
        Self {
            requested: Requested::First,
            per_page: per_page.max(1),
        }
    }

    /// Parse a raw `?page=` value.
    pub fn parse(raw: Option<&str>, per_page: u32) -> Self {
        let requested = match raw.map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) => Requested::Number(n),
            _ => Requested::First,
        };
        Self {
            requested,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Clamp against the number of matching rows.
    pub fn resolve(&self, total_items: u64) -> PageWindow {
        let per_page = u64::from(self.per_page);
        let total_pages = total_items.div_ceil(per_page).max(1);

        let number = match self.requested {
            Requested::First => 1,
            Requested::Number(n) if n >= 1 && (n as u64) <= total_pages => n as u64,
            Requested::Number(_) => total_pages,
        };

        PageWindow {
            number: number as u32,
            per_page: self.per_page,
            total_items,
            total_pages: total_pages as u32,
        }
    }
}

/// A resolved page: what to fetch and how to describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PageWindow {
    /// Row offset for `OFFSET`.
    pub fn offset(&self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.per_page)
    }

    /// Row count for `LIMIT`.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    /// Slice an already-filtered, already-ordered list. In-memory stores use this.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let window = request.resolve(all.len() as u64);
        let items = all
            .into_iter()
            .skip(window.offset() as usize)
            .take(window.limit() as usize)
            .collect();
        window.into_page(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_garbage_page_is_first() {
        assert_eq!(PageRequest::parse(None, 20).resolve(100).number, 1);
        assert_eq!(PageRequest::parse(Some("abc"), 20).resolve(100).number, 1);
    }

    #[test]
    fn test_out_of_range_page_is_last() {
        assert_eq!(PageRequest::parse(Some("99"), 20).resolve(45).number, 3);
        assert_eq!(PageRequest::parse(Some("0"), 20).resolve(45).number, 3);
        assert_eq!(PageRequest::parse(Some("-2"), 20).resolve(45).number, 3);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let window = PageRequest::first(12).resolve(0);
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.number, 1);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_window_offsets() {
        let window = PageRequest::parse(Some("2"), 20).resolve(45);
        assert_eq!(window.offset(), 20);
        assert_eq!(window.limit(), 20);
        assert_eq!(window.total_pages, 3);
    }

    #[test]
    fn test_from_vec_slices_and_flags() {
        let page = Page::from_vec((1..=25).collect::<Vec<u32>>(), PageRequest::parse(Some("2"), 12));
        assert_eq!(page.items, (13..=24).collect::<Vec<u32>>());
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::from_vec((1..=25).collect::<Vec<u32>>(), PageRequest::parse(Some("3"), 12));
        assert_eq!(last.items, vec![25]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::from_vec(vec!["a"], PageRequest::first(20));
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("totalItems"));
        assert!(json.contains("totalPages"));
        assert!(json.contains("perPage"));
    }
}
