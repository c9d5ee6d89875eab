// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The normalized pagination envelope.
//!
//! Backends report pages in differing wire shapes; the gateway normalizes
//! every list response into a `PagedResult` whose navigation flags are
//! derived from the page position, never trusted from the wire.

use crate::error::DomainError;

/// One page of a filtered result set.
///
/// Replaced wholesale on each successful fetch; never patched in place.
/// Invariants: `has_next == page < total_pages` and `has_prev == page > 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedResult<T> {
    /// The records on this page, in server order.
    pub items: Vec<T>,
    /// Total records across all pages of the filtered set.
    pub total_items: u64,
    /// This page's number (1-based).
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total number of pages in the filtered set.
    pub total_pages: u32,
    /// Whether a previous page exists.
    pub has_prev: bool,
    /// Whether a further page exists.
    pub has_next: bool,
}

impl<T> PagedResult<T> {
    /// Builds a page envelope, deriving the navigation flags.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPage` if `page` is zero,
    /// `DomainError::InvalidPageSize` if `page_size` is zero, or
    /// `DomainError::InvalidPagination` if the item count exceeds the page
    /// size.
    pub fn new(
        items: Vec<T>,
        total_items: u64,
        page: u32,
        page_size: u32,
        total_pages: u32,
    ) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::InvalidPage { page });
        }
        if page_size == 0 {
            return Err(DomainError::InvalidPageSize { limit: page_size });
        }
        if items.len() as u64 > u64::from(page_size) {
            return Err(DomainError::InvalidPagination {
                reason: format!(
                    "page holds {} items but the page size is {page_size}",
                    items.len()
                ),
            });
        }

        Ok(Self {
            items,
            total_items,
            page,
            page_size,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        })
    }

    /// An empty first page with the given page size.
    #[must_use]
    pub const fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            page: 1,
            page_size,
            total_pages: 0,
            has_prev: false,
            has_next: false,
        }
    }

    /// Number of records on this page.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
