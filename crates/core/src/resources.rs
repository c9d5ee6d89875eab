// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource bindings for the three console list pages.
//!
//! Each binding pairs a domain record with its facet set and export schema,
//! collapsing the three pages into one parameterized controller.

use chapter_desk_domain::{
    Complaint, ComplaintCategory, ComplaintStatus, FilterState, Suggestion, SuggestionCategory,
    SuggestionStatus, TyfcbMemberSummary, compact_inr,
};
use std::str::FromStr;

use crate::error::CoreError;
use crate::export::sanitize_cell;
use crate::traits::{ColumnSpec, Resource, reject_status_edit};

/// The complaints list page.
#[derive(Debug, Clone, Copy)]
pub struct Complaints;

/// Facet filters accepted by the complaints list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFacets {
    /// Exact-match status constraint. `None` leaves status unconstrained.
    pub status: Option<ComplaintStatus>,
    /// Exact-match category constraint. `None` leaves category unconstrained.
    pub category: Option<ComplaintCategory>,
}

const COMPLAINT_TABULAR_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Sr No", key: "srNo" },
    ColumnSpec { header: "Member Name", key: "memberName" },
    ColumnSpec { header: "Subject", key: "subject" },
    ColumnSpec { header: "Category", key: "category" },
    ColumnSpec { header: "Status", key: "status" },
    ColumnSpec { header: "Admin Response", key: "adminResponse" },
    ColumnSpec { header: "Created At", key: "createdAt" },
];

const COMPLAINT_DOCUMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Sr No", key: "srNo" },
    ColumnSpec { header: "Member Name", key: "memberName" },
    ColumnSpec { header: "Subject", key: "subject" },
    ColumnSpec { header: "Category", key: "category" },
    ColumnSpec { header: "Status", key: "status" },
    ColumnSpec { header: "Created At", key: "createdAt" },
];

impl Resource for Complaints {
    type Record = Complaint;
    type Facets = ComplaintFacets;

    const REPORT_LABEL: &'static str = "Complaints";
    const DOCUMENT_TITLE: &'static str = "Complaints Report";
    const RECORD_NOUN: &'static str = "Complaint";
    const PLURAL_NOUN: &'static str = "complaints";
    const SUPPORTS_DELETE: bool = true;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn status_str(record: &Self::Record) -> Option<&'static str> {
        Some(record.status.as_str())
    }

    fn admin_response(record: &Self::Record) -> Option<&str> {
        record.admin_response.as_deref()
    }

    fn validate_status_change(record: &Self::Record, draft: &str) -> Result<String, CoreError> {
        let new_status: ComplaintStatus = ComplaintStatus::from_str(draft)?;
        record.status.validate_transition(new_status)?;
        Ok(new_status.as_str().to_string())
    }

    fn tabular_columns() -> &'static [ColumnSpec] {
        COMPLAINT_TABULAR_COLUMNS
    }

    fn tabular_row(record: &Self::Record, index: usize) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            sanitize_cell(&record.member_name),
            sanitize_cell(&record.subject),
            record.category.label().to_string(),
            record.status.label().to_string(),
            sanitize_cell(record.admin_response.as_deref().unwrap_or("N/A")),
            record.created_at.clone(),
        ]
    }

    fn document_columns() -> &'static [ColumnSpec] {
        COMPLAINT_DOCUMENT_COLUMNS
    }

    fn document_row(record: &Self::Record, index: usize) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            sanitize_cell(&record.member_name),
            sanitize_cell(&record.subject),
            record.category.label().to_string(),
            record.status.label().to_string(),
            record.created_at.clone(),
        ]
    }

    fn document_subtitle(filters: &FilterState<Self::Facets>) -> String {
        let facets: &ComplaintFacets = filters.facets();
        let mut parts: Vec<String> = Vec::new();
        if let Some(status) = facets.status {
            parts.push(format!("Status: {}", status.label()));
        }
        if let Some(category) = facets.category {
            parts.push(format!("Category: {}", category.label()));
        }
        if parts.is_empty() {
            String::from("All Complaints")
        } else {
            parts.join(" | ")
        }
    }
}

/// The suggestions list page.
#[derive(Debug, Clone, Copy)]
pub struct Suggestions;

/// Facet filters accepted by the suggestions list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionFacets {
    /// Exact-match status constraint. `None` leaves status unconstrained.
    pub status: Option<SuggestionStatus>,
    /// Exact-match category constraint. `None` leaves category unconstrained.
    pub category: Option<SuggestionCategory>,
}

const SUGGESTION_TABULAR_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Sr No", key: "srNo" },
    ColumnSpec { header: "Member Name", key: "memberName" },
    ColumnSpec { header: "Subject", key: "subject" },
    ColumnSpec { header: "Category", key: "category" },
    ColumnSpec { header: "Status", key: "status" },
    ColumnSpec { header: "Admin Response", key: "adminResponse" },
    ColumnSpec { header: "Created At", key: "createdAt" },
];

const SUGGESTION_DOCUMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Sr No", key: "srNo" },
    ColumnSpec { header: "Member Name", key: "memberName" },
    ColumnSpec { header: "Subject", key: "subject" },
    ColumnSpec { header: "Category", key: "category" },
    ColumnSpec { header: "Status", key: "status" },
    ColumnSpec { header: "Created At", key: "createdAt" },
];

impl Resource for Suggestions {
    type Record = Suggestion;
    type Facets = SuggestionFacets;

    const REPORT_LABEL: &'static str = "Suggestions";
    const DOCUMENT_TITLE: &'static str = "Suggestions Report";
    const RECORD_NOUN: &'static str = "Suggestion";
    const PLURAL_NOUN: &'static str = "suggestions";
    const SUPPORTS_DELETE: bool = true;

    fn record_id(record: &Self::Record) -> &str {
        &record.id
    }

    fn status_str(record: &Self::Record) -> Option<&'static str> {
        Some(record.status.as_str())
    }

    fn admin_response(record: &Self::Record) -> Option<&str> {
        record.admin_response.as_deref()
    }

    fn validate_status_change(record: &Self::Record, draft: &str) -> Result<String, CoreError> {
        let new_status: SuggestionStatus = SuggestionStatus::from_str(draft)?;
        record.status.validate_transition(new_status)?;
        Ok(new_status.as_str().to_string())
    }

    fn tabular_columns() -> &'static [ColumnSpec] {
        SUGGESTION_TABULAR_COLUMNS
    }

    fn tabular_row(record: &Self::Record, index: usize) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            sanitize_cell(&record.member_name),
            sanitize_cell(&record.subject),
            record.category.label().to_string(),
            record.status.label().to_string(),
            sanitize_cell(record.admin_response.as_deref().unwrap_or("N/A")),
            record.created_at.clone(),
        ]
    }

    fn document_columns() -> &'static [ColumnSpec] {
        SUGGESTION_DOCUMENT_COLUMNS
    }

    fn document_row(record: &Self::Record, index: usize) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            sanitize_cell(&record.member_name),
            sanitize_cell(&record.subject),
            record.category.label().to_string(),
            record.status.label().to_string(),
            record.created_at.clone(),
        ]
    }

    fn document_subtitle(filters: &FilterState<Self::Facets>) -> String {
        let facets: &SuggestionFacets = filters.facets();
        let mut parts: Vec<String> = Vec::new();
        if let Some(status) = facets.status {
            parts.push(format!("Status: {}", status.label()));
        }
        if let Some(category) = facets.category {
            parts.push(format!("Category: {}", category.label()));
        }
        if parts.is_empty() {
            String::from("All Suggestions")
        } else {
            parts.join(" | ")
        }
    }
}

/// The TYFCB summary reporting page. Read-only: no status lifecycle, no
/// deletion.
#[derive(Debug, Clone, Copy)]
pub struct TyfcbSummary;

/// Facet filters accepted by the TYFCB summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TyfcbFacets {
    /// Restrict the summary to one chapter. `None` covers all chapters.
    pub chapter_name: Option<String>,
}

const TYFCB_TABULAR_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Sr No", key: "srNo" },
    ColumnSpec { header: "Member Name", key: "memberName" },
    ColumnSpec { header: "Chapter", key: "chapter" },
    ColumnSpec { header: "Total Amount", key: "totalAmount" },
    ColumnSpec { header: "Transaction Count", key: "transactionCount" },
    ColumnSpec { header: "Average Amount", key: "averageAmount" },
    ColumnSpec { header: "First Transaction", key: "firstTransaction" },
    ColumnSpec { header: "Last Transaction", key: "lastTransaction" },
];

const TYFCB_DOCUMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Sr No", key: "srNo" },
    ColumnSpec { header: "Member Name", key: "memberName" },
    ColumnSpec { header: "Chapter", key: "chapter" },
    ColumnSpec { header: "Total Amount", key: "totalAmount" },
    ColumnSpec { header: "Transactions", key: "transactionCount" },
    ColumnSpec { header: "Average", key: "averageAmount" },
    ColumnSpec { header: "First Transaction", key: "firstTransaction" },
];

impl Resource for TyfcbSummary {
    type Record = TyfcbMemberSummary;
    type Facets = TyfcbFacets;

    const REPORT_LABEL: &'static str = "TYFCB_Summary";
    const DOCUMENT_TITLE: &'static str = "TYFCB Summary Report";
    const RECORD_NOUN: &'static str = "TYFCB summary";
    const PLURAL_NOUN: &'static str = "TYFCB summaries";
    const SUPPORTS_DELETE: bool = false;

    fn record_id(record: &Self::Record) -> &str {
        // Summaries are aggregated per member; the member is the identity.
        &record.member_name
    }

    fn status_str(_record: &Self::Record) -> Option<&'static str> {
        None
    }

    fn admin_response(_record: &Self::Record) -> Option<&str> {
        None
    }

    fn validate_status_change(_record: &Self::Record, draft: &str) -> Result<String, CoreError> {
        Err(reject_status_edit(Self::REPORT_LABEL, draft))
    }

    fn tabular_columns() -> &'static [ColumnSpec] {
        TYFCB_TABULAR_COLUMNS
    }

    fn tabular_row(record: &Self::Record, index: usize) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            sanitize_cell(&record.member_name),
            sanitize_cell(&record.chapter_name),
            format!("{:.0}", record.total_amount),
            record.transaction_count.to_string(),
            format!("{:.0}", record.average_amount.round()),
            record.first_transaction.clone().unwrap_or_else(|| String::from("N/A")),
            record.last_transaction.clone().unwrap_or_else(|| String::from("N/A")),
        ]
    }

    fn document_columns() -> &'static [ColumnSpec] {
        TYFCB_DOCUMENT_COLUMNS
    }

    fn document_row(record: &Self::Record, index: usize) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            record.member_name.clone(),
            record.chapter_name.clone(),
            compact_inr(record.total_amount),
            record.transaction_count.to_string(),
            compact_inr(record.average_amount),
            record.first_transaction.clone().unwrap_or_else(|| String::from("N/A")),
        ]
    }

    fn document_subtitle(filters: &FilterState<Self::Facets>) -> String {
        let mut subtitle: String = filters.facets().chapter_name.as_ref().map_or_else(
            || String::from("All Chapters"),
            |chapter| format!("Chapter: {chapter}"),
        );
        if let Some(range) = filters.date_range() {
            subtitle.push_str(&format!(
                " | Period: {} to {}",
                range.start_str(),
                range.end_str()
            ));
        }
        subtitle
    }
}
