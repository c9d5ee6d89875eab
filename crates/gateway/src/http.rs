// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `reqwest` implementation of the backend contract.
//!
//! One gateway instance serves all three resources. Unset facets are
//! omitted from the query string entirely, so they never constrain the
//! backend query.

use async_trait::async_trait;
use chapter_desk::{
    BackendError, ComplaintFacets, Complaints, ListBackend, StatusChange, SuggestionFacets,
    Suggestions, TyfcbFacets, TyfcbSummary,
};
use chapter_desk_domain::{
    Complaint, FilterState, PagedResult, Suggestion, TyfcbMemberSummary,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::wire::{ListEnvelope, TyfcbEnvelope, WireComplaint, WireSuggestion};

/// HTTP gateway to the organization's backend API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

/// Body of a status mutation request.
#[derive(Debug, Serialize)]
struct StatusBody<'a> {
    status: &'a str,
    #[serde(rename = "adminResponse")]
    admin_response: &'a str,
}

impl HttpGateway {
    /// Creates a gateway against the given API base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let url: String = format!("{}{path}", self.base_url);
        debug!(url = %url, ?query, "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        let response = error_for_status(response).await?;
        response.json::<T>().await.map_err(decode_error)
    }

    async fn patch_status(&self, path: &str, change: &StatusChange) -> Result<(), BackendError> {
        let url: String = format!("{}{path}", self.base_url);
        debug!(url = %url, status = %change.status, "PATCH");
        let body: StatusBody<'_> = StatusBody {
            status: &change.status,
            admin_response: change.note.as_deref().unwrap_or(""),
        };
        let response = self
            .client
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        error_for_status(response).await.map(|_| ())
    }

    async fn delete_path(&self, path: &str) -> Result<(), BackendError> {
        let url: String = format!("{}{path}", self.base_url);
        debug!(url = %url, "DELETE");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;
        error_for_status(response).await.map(|_| ())
    }
}

/// Query pairs shared by every list endpoint.
fn base_query<F>(filters: &FilterState<F>) -> Vec<(&'static str, String)> {
    vec![
        ("page", filters.page().to_string()),
        ("limit", filters.limit().to_string()),
        ("search", filters.search().to_string()),
    ]
}

fn transport_error(err: reqwest::Error) -> BackendError {
    BackendError::Network {
        message: err.to_string(),
    }
}

fn decode_error(err: reqwest::Error) -> BackendError {
    BackendError::InvalidResponse {
        message: err.to_string(),
    }
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message: String = response.text().await.unwrap_or_default();
    Err(BackendError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ListBackend<Complaints> for HttpGateway {
    async fn list(
        &self,
        filters: &FilterState<ComplaintFacets>,
    ) -> Result<PagedResult<Complaint>, BackendError> {
        let mut query: Vec<(&'static str, String)> = base_query(filters);
        let facets: &ComplaintFacets = filters.facets();
        if let Some(status) = facets.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = facets.category {
            query.push(("category", category.as_str().to_string()));
        }

        let envelope: ListEnvelope<WireComplaint> =
            self.get_json("/complaints", &query).await?;
        envelope.into_paged(Complaint::from)
    }

    async fn update_status(&self, id: &str, change: StatusChange) -> Result<(), BackendError> {
        self.patch_status(&format!("/complaints/{id}/status"), &change)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.delete_path(&format!("/complaints/{id}")).await
    }
}

#[async_trait]
impl ListBackend<Suggestions> for HttpGateway {
    async fn list(
        &self,
        filters: &FilterState<SuggestionFacets>,
    ) -> Result<PagedResult<Suggestion>, BackendError> {
        let mut query: Vec<(&'static str, String)> = base_query(filters);
        let facets: &SuggestionFacets = filters.facets();
        if let Some(status) = facets.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = facets.category {
            query.push(("category", category.as_str().to_string()));
        }

        let envelope: ListEnvelope<WireSuggestion> =
            self.get_json("/suggestions", &query).await?;
        envelope.into_paged(Suggestion::from)
    }

    async fn update_status(&self, id: &str, change: StatusChange) -> Result<(), BackendError> {
        self.patch_status(&format!("/suggestions/{id}/status"), &change)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.delete_path(&format!("/suggestions/{id}")).await
    }
}

// TYFCB summaries are read-only: the rejecting contract defaults cover
// update_status and delete.
#[async_trait]
impl ListBackend<TyfcbSummary> for HttpGateway {
    async fn list(
        &self,
        filters: &FilterState<TyfcbFacets>,
    ) -> Result<PagedResult<TyfcbMemberSummary>, BackendError> {
        let mut query: Vec<(&'static str, String)> = vec![
            ("page", filters.page().to_string()),
            ("limit", filters.limit().to_string()),
        ];
        if let Some(range) = filters.date_range() {
            query.push(("startDate", range.start_str()));
            query.push(("endDate", range.end_str()));
        }
        if let Some(chapter) = &filters.facets().chapter_name {
            query.push(("chapter_name", chapter.clone()));
        }

        let envelope: TyfcbEnvelope = self.get_json("/tyfcb/summary", &query).await?;
        envelope.into_paged(filters.limit())
    }
}
