// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::traits::{BackendError, ExportError};
use chapter_desk_domain::DomainError;

/// Errors surfaced by the list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated before any network call.
    Domain(DomainError),
    /// A backend call failed.
    Backend(BackendError),
    /// An export collaborator failed to write the file.
    Export(ExportError),
    /// An export is already running for this controller.
    ExportInProgress,
    /// The export pagination loop exceeded its page cap without the backend
    /// reporting a final page.
    ExportPageOverflow {
        /// The page cap that was exceeded.
        pages: u32,
    },
    /// No record with the given id is present in the held result page.
    RecordNotFound {
        /// The id that was looked up.
        id: String,
    },
    /// The operation requires an open status editor.
    NoActiveDialog,
    /// The resource has no operator-editable status.
    StatusEditUnsupported {
        /// The resource's report label.
        resource: &'static str,
    },
    /// The resource cannot be deleted from the console.
    DeleteUnsupported {
        /// The resource's report label.
        resource: &'static str,
    },
    /// The controller task has shut down.
    ControllerClosed,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "{err}"),
            Self::Backend(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::ExportInProgress => {
                write!(f, "An export is already in progress")
            }
            Self::ExportPageOverflow { pages } => {
                write!(
                    f,
                    "Export aborted: the backend reported more than {pages} pages without a final page"
                )
            }
            Self::RecordNotFound { id } => {
                write!(f, "Record '{id}' is not on the current page")
            }
            Self::NoActiveDialog => {
                write!(f, "No status editor is open")
            }
            Self::StatusEditUnsupported { resource } => {
                write!(f, "{resource} records have no editable status")
            }
            Self::DeleteUnsupported { resource } => {
                write!(f, "{resource} records cannot be deleted")
            }
            Self::ControllerClosed => {
                write!(f, "The list controller has shut down")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

impl From<ExportError> for CoreError {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}
