// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pure list-controller state machine.
//!
//! `ListController` owns the filter state, the held result page, the
//! loading/exporting flags, the active dialog, and the fetch sequence
//! watermarks. It performs no I/O: the actor in [`crate::actor`] drives it
//! and runs the backend calls, so every transition stays directly
//! unit-testable.

use chapter_desk_domain::{DateRange, DomainError, FilterState, PagedResult};
use std::time::Duration;

use crate::error::CoreError;
use crate::traits::{BackendError, Resource, StatusChange};

/// Quiet period a burst of filter edits must observe before one fetch is
/// issued for the whole burst.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(300);

/// Explicit dialog state, owned by the controller and rendered
/// declaratively by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDialog<T> {
    /// No dialog is open.
    None,
    /// The status editor is open over one record.
    StatusEdit {
        /// The record being edited.
        record: T,
        /// The operator's draft status string, validated on save.
        draft_status: String,
        /// The operator's draft admin response.
        draft_note: String,
    },
    /// The read-only detail view is open over one record.
    ViewDetail {
        /// The record being viewed.
        record: T,
    },
}

/// A fetch issued by the controller: its sequence number and the filter
/// snapshot it must query with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<F> {
    /// Monotonic sequence number of this fetch.
    pub seq: u64,
    /// The filters at issue time.
    pub filters: FilterState<F>,
}

/// How a completed fetch was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page replaced the held result.
    Applied,
    /// A newer fetch already applied; this response was discarded.
    Stale,
    /// The fetch failed; the held result was preserved.
    Failed(BackendError),
}

/// A read-only snapshot of controller state for rendering.
#[derive(Debug)]
pub struct ViewState<R: Resource> {
    /// The current filters.
    pub filters: FilterState<R::Facets>,
    /// The held result page, if any fetch has succeeded.
    pub result: Option<PagedResult<R::Record>>,
    /// Whether the most recently issued fetch is still outstanding.
    pub loading: bool,
    /// Whether an export is running.
    pub exporting: bool,
    /// The active dialog.
    pub dialog: ActiveDialog<R::Record>,
}

impl<R: Resource> Clone for ViewState<R> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            result: self.result.clone(),
            loading: self.loading,
            exporting: self.exporting,
            dialog: self.dialog.clone(),
        }
    }
}

/// The list controller state for one resource instance.
///
/// State machine: `Idle → Loading → (Idle | Error)`. A new fetch supersedes
/// tracking of any outstanding one; completions apply in arrival order but
/// never overwrite a newer applied result (sequence watermark).
#[derive(Debug)]
pub struct ListController<R: Resource> {
    filters: FilterState<R::Facets>,
    result: Option<PagedResult<R::Record>>,
    loading: bool,
    exporting: bool,
    dialog: ActiveDialog<R::Record>,
    /// Sequence of the most recently issued fetch.
    issued_seq: u64,
    /// Sequence of the most recently applied fetch.
    applied_seq: u64,
}

impl<R: Resource> Default for ListController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListController<R> {
    /// Creates a controller with default filters and no held result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filters: FilterState::new(R::Facets::default()),
            result: None,
            loading: false,
            exporting: false,
            dialog: ActiveDialog::None,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    /// The current filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterState<R::Facets> {
        &self.filters
    }

    /// The held result page, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&PagedResult<R::Record>> {
        self.result.as_ref()
    }

    /// Whether the most recently issued fetch is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether an export is running.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// The active dialog.
    #[must_use]
    pub const fn dialog(&self) -> &ActiveDialog<R::Record> {
        &self.dialog
    }

    /// Sets the free-text search. Resets to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.set_search(search);
    }

    /// Sets the page size. Resets to page 1.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageSize` if `limit` is zero.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), DomainError> {
        self.filters.set_limit(limit)
    }

    /// Sets or clears the date range. Resets to page 1.
    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filters.set_date_range(range);
    }

    /// Edits the facet set in place. Resets to page 1.
    pub fn edit_facets(&mut self, edit: impl FnOnce(&mut R::Facets)) {
        self.filters.edit_facets(edit);
    }

    /// Restores every filter to its initial value.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
    }

    /// Navigates to a page without resetting other filters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPage` if `page` is zero.
    pub fn go_to_page(&mut self, page: u32) -> Result<(), DomainError> {
        self.filters.set_page(page)
    }

    /// Marks an export as running.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ExportInProgress` if one already is.
    pub const fn begin_export(&mut self) -> Result<(), CoreError> {
        if self.exporting {
            return Err(CoreError::ExportInProgress);
        }
        self.exporting = true;
        Ok(())
    }

    /// Clears the exporting flag.
    pub const fn finish_export(&mut self) {
        self.exporting = false;
    }

    /// Issues a new fetch: validates the filters, raises the loading flag,
    /// and returns the ticket the I/O layer must execute.
    ///
    /// # Errors
    ///
    /// Returns the violated filter precondition; the loading flag is left
    /// untouched in that case.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket<R::Facets>, DomainError> {
        self.filters.validate()?;
        self.issued_seq += 1;
        self.loading = true;
        Ok(FetchTicket {
            seq: self.issued_seq,
            filters: self.filters.clone(),
        })
    }

    /// Records a fetch completion.
    ///
    /// The loading flag is cleared when the most recently issued fetch
    /// completes, success or failure alike. A successful page replaces the
    /// held result only if no newer fetch has already applied; a failure
    /// preserves the held result unchanged.
    pub fn complete_fetch(
        &mut self,
        seq: u64,
        outcome: Result<PagedResult<R::Record>, BackendError>,
    ) -> FetchOutcome {
        if seq == self.issued_seq {
            self.loading = false;
        }

        match outcome {
            Ok(page) => {
                if seq > self.applied_seq {
                    self.applied_seq = seq;
                    self.result = Some(page);
                    FetchOutcome::Applied
                } else {
                    FetchOutcome::Stale
                }
            }
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    /// Opens the status editor over the record with the given id, seeding
    /// the drafts from the record's current values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordNotFound` if the id is not on the current
    /// page.
    pub fn open_status_editor(&mut self, id: &str) -> Result<(), CoreError> {
        let record: R::Record = self.find_record(id)?;
        self.dialog = ActiveDialog::StatusEdit {
            draft_status: R::status_str(&record).unwrap_or_default().to_string(),
            draft_note: R::admin_response(&record).unwrap_or_default().to_string(),
            record,
        };
        Ok(())
    }

    /// Opens the read-only detail view over the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordNotFound` if the id is not on the current
    /// page.
    pub fn open_detail(&mut self, id: &str) -> Result<(), CoreError> {
        let record: R::Record = self.find_record(id)?;
        self.dialog = ActiveDialog::ViewDetail { record };
        Ok(())
    }

    /// Closes any open dialog and clears the selection.
    pub fn close_dialog(&mut self) {
        self.dialog = ActiveDialog::None;
    }

    /// Validates the draft status held by the open status editor and
    /// builds the mutation to send.
    ///
    /// This is the client-side precondition gate: an empty or
    /// lifecycle-invalid draft never reaches the backend and does not touch
    /// the loading flag.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoActiveDialog` if no status editor is open, or
    /// the validation error for a bad draft.
    pub fn prepare_status_change(
        &self,
        draft_status: &str,
        draft_note: &str,
    ) -> Result<(String, StatusChange), CoreError> {
        let ActiveDialog::StatusEdit { record, .. } = &self.dialog else {
            return Err(CoreError::NoActiveDialog);
        };

        let status: String = R::validate_status_change(record, draft_status)?;
        let note: Option<String> = if draft_note.is_empty() {
            None
        } else {
            Some(draft_note.to_string())
        };

        Ok((
            R::record_id(record).to_string(),
            StatusChange { status, note },
        ))
    }

    /// Builds a read-only snapshot for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ViewState<R> {
        ViewState {
            filters: self.filters.clone(),
            result: self.result.clone(),
            loading: self.loading,
            exporting: self.exporting,
            dialog: self.dialog.clone(),
        }
    }

    fn find_record(&self, id: &str) -> Result<R::Record, CoreError> {
        self.result
            .as_ref()
            .and_then(|page| page.items.iter().find(|r| R::record_id(r) == id))
            .cloned()
            .ok_or_else(|| CoreError::RecordNotFound { id: id.to_string() })
    }
}
