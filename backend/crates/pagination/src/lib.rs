//! Page/limit request normalisation and page envelopes for listing endpoints.
//!
//! Listing operations accept a one-based `page` and a `limit`. Zero values mean
//! "not specified" and fall back to the defaults; oversized limits are clamped
//! so a single request can never pull an unbounded result set.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(0, 0);
//! assert_eq!(request, PageRequest::default());
//! assert_eq!(request.offset(), 0);
//!
//! let page = Page::new(vec!["a", "b"], 12, request);
//! assert_eq!(page.total_pages(), 2);
//! assert!(page.has_next());
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when the caller does not specify one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Normalised page/limit pair.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    limit: u32,
}

impl From<RawPageRequest> for PageRequest {
    fn from(value: RawPageRequest) -> Self {
        Self::new(value.page, value.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request, replacing zero values with defaults and clamping the
    /// limit to [`MAX_LIMIT`].
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        let limit = if limit == 0 {
            DEFAULT_LIMIT
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        };
        Self { page, limit }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before the first item of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Page number this envelope describes.
    pub page: u32,
    /// Page size used to produce this envelope.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Wrap `items` for the given request.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    /// An empty page for the given request.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Number of pages needed to hold `total` items.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit as u64)
    }

    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}
