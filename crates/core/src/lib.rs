// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf
)]

mod actor;
mod controller;
mod error;
mod export;
mod resources;
mod traits;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use actor::{Collaborators, ListHandle, spawn_controller};
pub use controller::{
    ActiveDialog, DEBOUNCE_QUIET, FetchOutcome, FetchTicket, ListController, ViewState,
};
pub use error::CoreError;
pub use export::{
    EXPORT_MAX_PAGES, EXPORT_PAGE_SIZE, ExportFormat, ExportOutcome, collect_all_records,
    export_file_base,
};
pub use resources::{
    ComplaintFacets, Complaints, SuggestionFacets, Suggestions, TyfcbFacets, TyfcbSummary,
};
pub use traits::{
    BackendError, ColumnSpec, ConfirmPrompt, DeleteOutcome, DocumentExporter, ExportError,
    ListBackend, NoticeLevel, Notifier, Resource, StatusChange, TabularExporter,
};
