// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Page number must be at least 1.
    InvalidPage {
        /// The invalid page value.
        page: u32,
    },
    /// Page size must be greater than zero.
    InvalidPageSize {
        /// The invalid page size value.
        limit: u32,
    },
    /// A status string was empty where a concrete status is required.
    EmptyStatus,
    /// Complaint status string is not a valid status.
    InvalidComplaintStatus {
        /// The invalid status string.
        status: String,
    },
    /// Suggestion status string is not a valid status.
    InvalidSuggestionStatus {
        /// The invalid status string.
        status: String,
    },
    /// Complaint category string is not a valid category.
    InvalidComplaintCategory {
        /// The invalid category string.
        category: String,
    },
    /// Suggestion category string is not a valid category.
    InvalidSuggestionCategory {
        /// The invalid category string.
        category: String,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date range start is after its end.
    InvalidDateRange {
        /// The range start.
        start: String,
        /// The range end.
        end: String,
    },
    /// A pagination envelope violated its invariants.
    InvalidPagination {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPage { page } => {
                write!(f, "Invalid page number: {page}. Must be at least 1")
            }
            Self::InvalidPageSize { limit } => {
                write!(f, "Invalid page size: {limit}. Must be greater than 0")
            }
            Self::EmptyStatus => write!(f, "A status must be selected"),
            Self::InvalidComplaintStatus { status } => {
                write!(f, "Invalid complaint status: '{status}'")
            }
            Self::InvalidSuggestionStatus { status } => {
                write!(f, "Invalid suggestion status: '{status}'")
            }
            Self::InvalidComplaintCategory { category } => {
                write!(f, "Invalid complaint category: '{category}'")
            }
            Self::InvalidSuggestionCategory { category } => {
                write!(f, "Invalid suggestion category: '{category}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change status from '{from}' to '{to}': {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}")
            }
            Self::InvalidPagination { reason } => {
                write!(f, "Invalid pagination data: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
