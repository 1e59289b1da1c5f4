//! Page request and page envelope primitives.
//!
//! The franchise backend pages collections with zero-based page numbers and
//! a page size, and answers with a `{ content, pageInfo }` envelope. This
//! crate owns both halves so every adapter validates and decodes them the
//! same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size the client will request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// A page must hold at least one element.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// The requested size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max} (got {size})")]
    SizeTooLarge {
        /// Size that was requested.
        size: u32,
        /// Upper bound enforced by the client.
        max: u32,
    },
}

/// Zero-based page coordinates sent as `page` and `size` query parameters.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 20)?;
/// assert_eq!(request.next().page(), 3);
/// # Ok::<(), pagination::PageRequestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `size` is zero or above
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    /// First page with the given size, clamped into `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn first(size: u32) -> Self {
        Self {
            page: 0,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of elements per page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// The request for the following page with the same size.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
        }
    }

    /// Query parameters in the order the backend documents them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Paging metadata returned alongside page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Zero-based index of this page.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
    /// Whether a following page exists.
    pub has_next: bool,
    /// Whether a preceding page exists.
    pub has_previous: bool,
}

impl PageInfo {
    /// Derive consistent metadata for `request` over `total_elements` items.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageInfo, PageRequest};
    ///
    /// let info = PageInfo::for_request(PageRequest::new(1, 10)?, 25);
    /// assert_eq!(info.total_pages, 3);
    /// assert!(info.has_next && info.has_previous);
    /// # Ok::<(), pagination::PageRequestError>(())
    /// ```
    #[must_use]
    pub fn for_request(request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size()));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let has_next = request.page().saturating_add(1) < total_pages;
        Self {
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages,
            first: request.page() == 0,
            last: !has_next,
            has_next,
            has_previous: request.page() > 0,
        }
    }
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Elements on this page.
    pub content: Vec<T>,
    /// Paging metadata.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Slice `items` into the page addressed by `request`.
    ///
    /// Useful for in-memory backends that hold the whole collection.
    #[must_use]
    pub fn from_items(items: Vec<T>, request: PageRequest) -> Self {
        let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let page_info = PageInfo::for_request(request, total);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let skip = usize::try_from(request.page())
            .unwrap_or(usize::MAX)
            .saturating_mul(size);
        let content = items.into_iter().skip(skip).take(size).collect();
        Self { content, page_info }
    }

    /// Transform every element, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }

    /// Transform every element fallibly, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            content: self.content.into_iter().map(f).collect::<Result<_, _>>()?,
            page_info: self.page_info,
        })
    }

    /// Request for the following page, or `None` on the last page.
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        if !self.page_info.has_next {
            return None;
        }
        PageRequest::new(self.page_info.page, self.page_info.size)
            .ok()
            .map(|request| request.next())
    }

    /// Whether the page carries no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
