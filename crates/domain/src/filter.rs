// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! List query filter state.
//!
//! `FilterState` owns everything a list query depends on: page, page size,
//! free-text search, the resource-specific facet set, and an optional date
//! range. Every mutation except explicit page navigation resets the page
//! back to 1, so a narrowed query never points past its last page.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Parses a date range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if either string is not a valid
    /// date, or `DomainError::InvalidDateRange` if the start is after the end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let format = format_description!("[year]-[month]-[day]");
        let parse_one = |s: &str| {
            Date::parse(s, &format).map_err(|e| DomainError::DateParseError {
                date_string: s.to_string(),
                error: e.to_string(),
            })
        };

        let start_date: Date = parse_one(start)?;
        let end_date: Date = parse_one(end)?;

        if start_date > end_date {
            return Err(DomainError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            start: start_date,
            end: end_date,
        })
    }

    /// The range start.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// The range end.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// The range start as a `YYYY-MM-DD` string.
    #[must_use]
    pub fn start_str(&self) -> String {
        format_ymd(self.start)
    }

    /// The range end as a `YYYY-MM-DD` string.
    #[must_use]
    pub fn end_str(&self) -> String {
        format_ymd(self.end)
    }
}

/// Formats a date as `YYYY-MM-DD`.
fn format_ymd(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    // The year/month/day description cannot fail for an in-range Date.
    date.format(&format)
        .unwrap_or_else(|_| date.to_string())
}

/// The complete filter state for one list controller instance.
///
/// `F` is the resource's facet set: exact-match constraints such as a status
/// or category selection. Unset facets do not constrain the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<F> {
    page: u32,
    limit: u32,
    search: String,
    facets: F,
    date_range: Option<DateRange>,
}

impl<F> FilterState<F> {
    /// Creates filter state on page 1 with the default page size, an empty
    /// search, and the given facet set.
    #[must_use]
    pub const fn new(facets: F) -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            facets,
            date_range: None,
        }
    }

    /// The current page (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The current page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// The current free-text search.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The current facet set.
    #[must_use]
    pub const fn facets(&self) -> &F {
        &self.facets
    }

    /// The current date range, if one is set.
    #[must_use]
    pub const fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// Sets the free-text search and resets to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Sets the page size and resets to page 1.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageSize` if `limit` is zero.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidPageSize { limit });
        }
        self.limit = limit;
        self.page = 1;
        Ok(())
    }

    /// Sets or clears the date range and resets to page 1.
    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.date_range = range;
        self.page = 1;
    }

    /// Edits the facet set in place and resets to page 1.
    pub fn edit_facets(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.facets);
        self.page = 1;
    }

    /// Navigates to a page. Does not reset any other filter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPage` if `page` is zero.
    pub fn set_page(&mut self, page: u32) -> Result<(), DomainError> {
        if page == 0 {
            return Err(DomainError::InvalidPage { page });
        }
        self.page = page;
        Ok(())
    }

    /// Validates the fetch preconditions: page at least 1, page size above 0.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub const fn validate(&self) -> Result<(), DomainError> {
        if self.page == 0 {
            return Err(DomainError::InvalidPage { page: self.page });
        }
        if self.limit == 0 {
            return Err(DomainError::InvalidPageSize { limit: self.limit });
        }
        Ok(())
    }
}

impl<F: Default> FilterState<F> {
    /// Restores every filter to its initial value.
    pub fn reset(&mut self) {
        *self = Self::new(F::default());
    }
}

impl<F: Default> Default for FilterState<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct TestFacets {
        flag: Option<&'static str>,
    }

    #[test]
    fn test_search_resets_page() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        filters.set_page(4).expect("page 4 is valid");

        filters.set_search("alice");

        assert_eq!(filters.page(), 1);
        assert_eq!(filters.search(), "alice");
    }

    #[test]
    fn test_limit_resets_page() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        filters.set_page(3).expect("page 3 is valid");

        filters.set_limit(50).expect("limit 50 is valid");

        assert_eq!(filters.page(), 1);
        assert_eq!(filters.limit(), 50);
    }

    #[test]
    fn test_facet_edit_resets_page() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        filters.set_page(7).expect("page 7 is valid");

        filters.edit_facets(|f| f.flag = Some("pending"));

        assert_eq!(filters.page(), 1);
        assert_eq!(filters.facets().flag, Some("pending"));
    }

    #[test]
    fn test_date_range_resets_page() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        filters.set_page(2).expect("page 2 is valid");

        let range = DateRange::parse("2026-07-01", "2026-07-31").expect("valid range");
        filters.set_date_range(Some(range));

        assert_eq!(filters.page(), 1);
        assert!(filters.date_range().is_some());
    }

    #[test]
    fn test_page_navigation_preserves_other_filters() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        filters.set_search("bob");

        filters.set_page(5).expect("page 5 is valid");

        assert_eq!(filters.page(), 5);
        assert_eq!(filters.search(), "bob");
    }

    #[test]
    fn test_zero_page_rejected() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        assert_eq!(
            filters.set_page(0),
            Err(DomainError::InvalidPage { page: 0 })
        );
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        assert_eq!(
            filters.set_limit(0),
            Err(DomainError::InvalidPageSize { limit: 0 })
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut filters: FilterState<TestFacets> = FilterState::default();
        filters.set_search("carol");
        filters.set_limit(100).expect("limit 100 is valid");
        filters.edit_facets(|f| f.flag = Some("resolved"));

        filters.reset();

        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_date_range_rejects_inverted_range() {
        let result = DateRange::parse("2026-08-01", "2026-07-01");
        assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_date_range_rejects_malformed_date() {
        let result = DateRange::parse("2026-13-01", "2026-12-31");
        assert!(matches!(result, Err(DomainError::DateParseError { .. })));
    }

    #[test]
    fn test_date_range_round_trip() {
        let range = DateRange::parse("2026-07-01", "2026-07-31").expect("valid range");
        assert_eq!(range.start_str(), "2026-07-01");
        assert_eq!(range.end_str(), "2026-07-31");
    }
}
