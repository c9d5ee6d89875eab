// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire-format types for the backend's two pagination envelopes.
//!
//! The complaints and suggestions endpoints answer in a
//! mongoose-paginate-style envelope; the TYFCB summary endpoint nests its
//! page data under a `data` object. Both are normalized into
//! [`PagedResult`] here, with the navigation flags derived from the page
//! position rather than trusted from the wire.

use chapter_desk::BackendError;
use chapter_desk_domain::{
    Complaint, ComplaintCategory, ComplaintStatus, PagedResult, Suggestion, SuggestionCategory,
    SuggestionStatus, TyfcbMemberSummary,
};
use serde::Deserialize;

/// Mongoose-paginate-style list envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub limit: u32,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> ListEnvelope<T> {
    /// Normalizes the envelope, mapping each document.
    pub fn into_paged<U>(self, map: impl Fn(T) -> U) -> Result<PagedResult<U>, BackendError> {
        let items: Vec<U> = self.docs.into_iter().map(map).collect();
        PagedResult::new(items, self.total_docs, self.page, self.limit, self.total_pages).map_err(
            |err| BackendError::InvalidResponse {
                message: err.to_string(),
            },
        )
    }
}

/// A complaint as sent by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireComplaint {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub category: ComplaintCategory,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl From<WireComplaint> for Complaint {
    fn from(wire: WireComplaint) -> Self {
        Self {
            id: wire.id,
            member_name: wire.member_name,
            subject: wire.subject,
            description: wire.description,
            category: wire.category,
            status: wire.status,
            admin_response: wire.admin_response,
            created_at: wire.created_at,
        }
    }
}

/// A suggestion as sent by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSuggestion {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub category: SuggestionCategory,
    pub status: SuggestionStatus,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl From<WireSuggestion> for Suggestion {
    fn from(wire: WireSuggestion) -> Self {
        Self {
            id: wire.id,
            member_name: wire.member_name,
            subject: wire.subject,
            description: wire.description,
            category: wire.category,
            status: wire.status,
            admin_response: wire.admin_response,
            created_at: wire.created_at,
        }
    }
}

/// Top-level TYFCB summary response.
#[derive(Debug, Deserialize)]
pub struct TyfcbEnvelope {
    pub data: TyfcbData,
}

/// The `data` object of the TYFCB summary response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyfcbData {
    pub user_summaries: Vec<WireTyfcbSummary>,
    pub pagination: TyfcbPagination,
}

/// TYFCB pagination block, keyed differently from the list envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyfcbPagination {
    pub total_users: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

/// The member reference nested in a TYFCB summary row.
#[derive(Debug, Deserialize, Default)]
pub struct WireTyfcbUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub chapter_name: Option<String>,
}

/// One per-member TYFCB aggregate as sent by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTyfcbSummary {
    #[serde(default)]
    pub user: Option<WireTyfcbUser>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub average_amount: f64,
    #[serde(default)]
    pub first_transaction: Option<String>,
    #[serde(default)]
    pub last_transaction: Option<String>,
}

impl From<WireTyfcbSummary> for TyfcbMemberSummary {
    fn from(wire: WireTyfcbSummary) -> Self {
        let user: WireTyfcbUser = wire.user.unwrap_or_default();
        Self {
            member_name: user.name.unwrap_or_else(|| String::from("Unknown")),
            chapter_name: user.chapter_name.unwrap_or_else(|| String::from("N/A")),
            total_amount: wire.total_amount,
            transaction_count: wire.transaction_count,
            average_amount: wire.average_amount,
            first_transaction: wire.first_transaction,
            last_transaction: wire.last_transaction,
        }
    }
}

impl TyfcbEnvelope {
    /// Normalizes the nested envelope. `limit` is the requested page size,
    /// which the TYFCB pagination block does not echo back.
    pub fn into_paged(self, limit: u32) -> Result<PagedResult<TyfcbMemberSummary>, BackendError> {
        let pagination: TyfcbPagination = self.data.pagination;
        let items: Vec<TyfcbMemberSummary> = self
            .data
            .user_summaries
            .into_iter()
            .map(TyfcbMemberSummary::from)
            .collect();
        PagedResult::new(
            items,
            pagination.total_users,
            pagination.current_page,
            limit,
            pagination.total_pages,
        )
        .map_err(|err| BackendError::InvalidResponse {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_normalization_derives_navigation_flags() {
        let json = r#"{
            "docs": [],
            "totalDocs": 45,
            "limit": 10,
            "page": 2,
            "totalPages": 5,
            "hasPrevPage": false,
            "hasNextPage": false,
            "prevPage": null,
            "nextPage": null,
            "pagingCounter": 11
        }"#;

        let envelope: ListEnvelope<WireComplaint> =
            serde_json::from_str(json).expect("valid envelope");
        let paged: PagedResult<Complaint> =
            envelope.into_paged(Complaint::from).expect("valid page");

        // The wire flags lie above; the normalized flags come from the
        // page position.
        assert!(paged.has_prev);
        assert!(paged.has_next);
        assert_eq!(paged.total_items, 45);
        assert_eq!(paged.total_pages, 5);
    }

    #[test]
    fn test_wire_complaint_maps_to_domain() {
        let json = r#"{
            "_id": "64f1c0aa7",
            "memberName": "Asha Patel",
            "subject": "Late meeting start",
            "description": "The last two meetings started late.",
            "category": "general",
            "status": "in_progress",
            "adminResponse": "Raised with the chapter lead",
            "createdAt": "2026-07-14T09:30:00Z"
        }"#;

        let wire: WireComplaint = serde_json::from_str(json).expect("valid complaint");
        let complaint: Complaint = wire.into();

        assert_eq!(complaint.id, "64f1c0aa7");
        assert_eq!(complaint.status, ComplaintStatus::InProgress);
        assert_eq!(complaint.category, ComplaintCategory::General);
        assert_eq!(
            complaint.admin_response.as_deref(),
            Some("Raised with the chapter lead")
        );
    }

    #[test]
    fn test_wire_complaint_unknown_status_is_rejected() {
        let json = r#"{
            "_id": "x",
            "category": "general",
            "status": "escalated"
        }"#;

        let result: Result<WireComplaint, serde_json::Error> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_tyfcb_envelope_normalization() {
        let json = r#"{
            "data": {
                "userSummaries": [
                    {
                        "user": { "name": "Ravi Shah", "chapter_name": "North Chapter" },
                        "totalAmount": 250000.0,
                        "transactionCount": 3,
                        "averageAmount": 83333.33,
                        "firstTransaction": "2026-07-01",
                        "lastTransaction": "2026-07-20"
                    }
                ],
                "pagination": {
                    "totalUsers": 1,
                    "currentPage": 1,
                    "totalPages": 1,
                    "hasNextPage": false,
                    "hasPrevPage": false
                }
            }
        }"#;

        let envelope: TyfcbEnvelope = serde_json::from_str(json).expect("valid envelope");
        let paged: PagedResult<TyfcbMemberSummary> =
            envelope.into_paged(10).expect("valid page");

        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.items[0].member_name, "Ravi Shah");
        assert_eq!(paged.items[0].chapter_name, "North Chapter");
        assert!(!paged.has_next);
    }

    #[test]
    fn test_tyfcb_summary_with_missing_user_falls_back() {
        let json = r#"{
            "totalAmount": 1000.0,
            "transactionCount": 1,
            "averageAmount": 1000.0
        }"#;

        let wire: WireTyfcbSummary = serde_json::from_str(json).expect("valid summary");
        let summary: TyfcbMemberSummary = wire.into();

        assert_eq!(summary.member_name, "Unknown");
        assert_eq!(summary.chapter_name, "N/A");
        assert_eq!(summary.first_transaction, None);
    }
}
