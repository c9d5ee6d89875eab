// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The controller's seams: the backend contract, the export collaborators,
//! and the user-interaction collaborators.
//!
//! Everything the controller talks to lives behind one of these traits, so
//! a host can wire in real collaborators while tests use in-memory doubles.

use async_trait::async_trait;
use chapter_desk_domain::{DomainError, FilterState, PagedResult};
use std::path::PathBuf;
use thiserror::Error;

use crate::error::CoreError;

/// A resource the list controller can be instantiated over.
///
/// The three console resources (complaints, suggestions, TYFCB summaries)
/// collapse into one controller parameterized by this trait: the record
/// type, the facet set the backend accepts, and the export column schema.
pub trait Resource: Send + Sync + Sized + 'static {
    /// The record payload held in pages.
    type Record: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static;
    /// The resource's facet set (exact-match query constraints).
    type Facets: Clone + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    /// Label used in export file names.
    const REPORT_LABEL: &'static str;
    /// Title line for document exports.
    const DOCUMENT_TITLE: &'static str;
    /// Singular noun used in prompts and notifications, e.g. "Complaint".
    const RECORD_NOUN: &'static str;
    /// Plural noun used in notifications, e.g. "complaints".
    const PLURAL_NOUN: &'static str;
    /// Whether records of this resource can be deleted from the console.
    const SUPPORTS_DELETE: bool;

    /// The server-assigned identity of a record.
    fn record_id(record: &Self::Record) -> &str;

    /// The record's current status string, for resources with a status
    /// lifecycle.
    fn status_str(record: &Self::Record) -> Option<&'static str>;

    /// The record's current admin response, if the resource carries one.
    fn admin_response(record: &Self::Record) -> Option<&str>;

    /// Validates a draft status against the record's current status and
    /// returns the canonical status string to send to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource has no status lifecycle, the draft
    /// is empty or unknown, or the transition is not permitted.
    fn validate_status_change(record: &Self::Record, draft: &str) -> Result<String, CoreError>;

    /// Column schema for spreadsheet-style exports.
    fn tabular_columns() -> &'static [ColumnSpec];

    /// One spreadsheet row for a record. `index` is the 0-based position in
    /// the full accumulated export set.
    fn tabular_row(record: &Self::Record, index: usize) -> Vec<String>;

    /// Column schema for titled document exports.
    fn document_columns() -> &'static [ColumnSpec];

    /// One document row for a record.
    fn document_row(record: &Self::Record, index: usize) -> Vec<String>;

    /// Subtitle line for document exports, derived from the active filters.
    fn document_subtitle(filters: &FilterState<Self::Facets>) -> String;
}

/// A status mutation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The canonical status string to store.
    pub status: String,
    /// Optional free-text admin response.
    pub note: Option<String>,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was deleted and the list refreshed.
    Deleted,
    /// The operator declined the confirmation prompt.
    Cancelled,
}

/// Errors surfaced by the backend contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a response.
    Network {
        /// Description of the transport failure.
        message: String,
    },
    /// The backend answered with a failure status.
    Server {
        /// The HTTP status code.
        status: u16,
        /// The backend's error message.
        message: String,
    },
    /// The response arrived but could not be interpreted.
    InvalidResponse {
        /// Description of what was malformed.
        message: String,
    },
    /// The backend does not support this operation for this resource.
    Unsupported {
        /// The operation that was attempted.
        operation: &'static str,
    },
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { message } => write!(f, "Network error: {message}"),
            Self::Server { status, message } => {
                write!(f, "Server error ({status}): {message}")
            }
            Self::InvalidResponse { message } => {
                write!(f, "Invalid response from backend: {message}")
            }
            Self::Unsupported { operation } => {
                write!(f, "Operation '{operation}' is not supported for this resource")
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// The backend contract consumed by the controller.
///
/// `update_status` and `delete` have rejecting defaults: read-only reporting
/// resources implement only `list`.
#[async_trait]
pub trait ListBackend<R: Resource>: Send + Sync {
    /// Fetches one page of the filtered result set.
    async fn list(
        &self,
        filters: &FilterState<R::Facets>,
    ) -> Result<PagedResult<R::Record>, BackendError>;

    /// Stores a status change for one record.
    async fn update_status(&self, id: &str, change: StatusChange) -> Result<(), BackendError> {
        let _ = (id, change);
        Err(BackendError::Unsupported {
            operation: "update_status",
        })
    }

    /// Deletes one record.
    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let _ = id;
        Err(BackendError::Unsupported {
            operation: "delete",
        })
    }
}

/// One column of an export schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header text shown in the exported file.
    pub header: &'static str,
    /// Stable field key for the column.
    pub key: &'static str,
}

/// Errors produced by the export collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Writing the export file failed.
    #[error("Failed to write export file '{path}': {message}")]
    Io {
        /// The file that could not be written.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },
    /// A row's cell count does not match the column schema.
    #[error("Export row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// 0-based index of the offending row.
        row: usize,
        /// Number of cells found.
        found: usize,
        /// Number of cells required by the schema.
        expected: usize,
    },
}

/// Writes field-mapped rows as a spreadsheet-style file.
pub trait TabularExporter: Send + Sync {
    /// Writes `rows` under `columns` headers to a file named from
    /// `file_base`, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if a row is ragged or the file cannot be
    /// written.
    fn export(
        &self,
        columns: &[ColumnSpec],
        rows: &[Vec<String>],
        file_base: &str,
    ) -> Result<PathBuf, ExportError>;
}

/// Writes field-mapped rows as a titled, column-described document.
pub trait DocumentExporter: Send + Sync {
    /// Writes a document with a title and subtitle line followed by the
    /// row table, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if a row is ragged or the file cannot be
    /// written.
    fn export(
        &self,
        columns: &[ColumnSpec],
        rows: &[Vec<String>],
        title: &str,
        subtitle: &str,
        file_base: &str,
    ) -> Result<PathBuf, ExportError>;
}

/// Severity of a transient user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An operation completed.
    Success,
    /// Nothing failed, but the operator should take note.
    Warning,
    /// An operation failed.
    Error,
}

/// Surfaces transient success/warning/error messages to the operator.
pub trait Notifier: Send + Sync {
    /// Shows one transient message.
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Presents a yes/no prompt before a destructive action.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Returns true if the operator confirmed the action.
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Convenience used by resource impls to reject status edits.
pub(crate) fn reject_status_edit(resource: &'static str, draft: &str) -> CoreError {
    if draft.is_empty() {
        CoreError::Domain(DomainError::EmptyStatus)
    } else {
        CoreError::StatusEditUnsupported { resource }
    }
}
