// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The controller actor.
//!
//! One tokio task owns the [`ListController`] state and consumes a command
//! channel; hosts hold a cloneable [`ListHandle`]. All state mutation
//! happens on the actor task, which satisfies the single-writer requirement
//! without locks. Fetches and exports run as spawned tasks reporting back
//! through an internal channel, so a newer fetch can supersede a slower
//! older one.

use chapter_desk_domain::{DateRange, FilterState, PagedResult};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::controller::{DEBOUNCE_QUIET, FetchOutcome, ListController, ViewState};
use crate::error::CoreError;
use crate::export::{ExportFormat, ExportOutcome, build_rows, collect_all_records, export_file_base};
use crate::traits::{
    BackendError, ConfirmPrompt, DeleteOutcome, DocumentExporter, ListBackend, NoticeLevel,
    Notifier, Resource, TabularExporter,
};

type FetchReply<R> = oneshot::Sender<Result<ViewState<R>, CoreError>>;

/// The collaborators a controller instance is wired to.
#[derive(Clone)]
pub struct Collaborators {
    /// Surfaces transient messages to the operator.
    pub notifier: Arc<dyn Notifier>,
    /// Confirms destructive actions.
    pub confirm: Arc<dyn ConfirmPrompt>,
    /// Writes spreadsheet-style exports.
    pub tabular: Arc<dyn TabularExporter>,
    /// Writes titled document exports.
    pub document: Arc<dyn DocumentExporter>,
}

/// Commands accepted by the controller actor.
enum Command<R: Resource> {
    SetSearch(String),
    SetLimit(u32),
    SetDateRange(Option<DateRange>),
    EditFacets(Box<dyn FnOnce(&mut R::Facets) + Send>),
    ResetFilters,
    GoToPage { page: u32, reply: FetchReply<R> },
    Refresh { reply: FetchReply<R> },
    OpenStatusEditor {
        id: String,
        reply: oneshot::Sender<Result<ViewState<R>, CoreError>>,
    },
    OpenDetail {
        id: String,
        reply: oneshot::Sender<Result<ViewState<R>, CoreError>>,
    },
    CloseDialog,
    SaveStatus {
        draft_status: String,
        draft_note: String,
        reply: oneshot::Sender<Result<(), CoreError>>,
    },
    Delete {
        id: String,
        reply: oneshot::Sender<Result<DeleteOutcome, CoreError>>,
    },
    Export {
        format: ExportFormat,
        reply: oneshot::Sender<Result<ExportOutcome, CoreError>>,
    },
    Snapshot {
        reply: oneshot::Sender<ViewState<R>>,
    },
}

/// Completions reported back to the actor by its spawned tasks.
enum Internal<R: Resource> {
    FetchCompleted {
        seq: u64,
        outcome: Result<PagedResult<R::Record>, BackendError>,
    },
    ExportCompleted {
        format: ExportFormat,
        outcome: Result<ExportOutcome, CoreError>,
        reply: oneshot::Sender<Result<ExportOutcome, CoreError>>,
    },
}

/// Cloneable front-end to a controller actor.
pub struct ListHandle<R: Resource> {
    tx: mpsc::UnboundedSender<Command<R>>,
}

impl<R: Resource> Clone for ListHandle<R> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Spawns a controller actor over the given backend and collaborators.
pub fn spawn_controller<R, B>(backend: Arc<B>, collaborators: Collaborators) -> ListHandle<R>
where
    R: Resource,
    B: ListBackend<R> + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (internal_tx, internal_rx) = mpsc::unbounded_channel();

    let actor: ListActor<R, B> = ListActor {
        controller: ListController::new(),
        backend,
        collaborators,
        internal_tx,
        pending_fetch_replies: Vec::new(),
        debounce_deadline: None,
    };
    tokio::spawn(actor.run(rx, internal_rx));

    ListHandle { tx }
}

impl<R: Resource> ListHandle<R> {
    /// Sets the free-text search. Debounced.
    pub fn set_search(&self, search: impl Into<String>) {
        let _ = self.tx.send(Command::SetSearch(search.into()));
    }

    /// Sets the page size. Debounced.
    pub fn set_limit(&self, limit: u32) {
        let _ = self.tx.send(Command::SetLimit(limit));
    }

    /// Sets or clears the date range. Debounced.
    pub fn set_date_range(&self, range: Option<DateRange>) {
        let _ = self.tx.send(Command::SetDateRange(range));
    }

    /// Edits the facet set in place. Debounced.
    pub fn edit_facets(&self, edit: impl FnOnce(&mut R::Facets) + Send + 'static) {
        let _ = self.tx.send(Command::EditFacets(Box::new(edit)));
    }

    /// Restores every filter to its initial value and refreshes immediately.
    pub fn reset_filters(&self) {
        let _ = self.tx.send(Command::ResetFilters);
    }

    /// Navigates to a page and fetches immediately, bypassing the debounce.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or `CoreError::ControllerClosed` if the
    /// actor has shut down.
    pub async fn go_to_page(&self, page: u32) -> Result<ViewState<R>, CoreError> {
        self.request(|reply| Command::GoToPage { page, reply }).await?
    }

    /// Fetches immediately with the current filters.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or `CoreError::ControllerClosed` if the
    /// actor has shut down.
    pub async fn refresh(&self) -> Result<ViewState<R>, CoreError> {
        self.request(|reply| Command::Refresh { reply }).await?
    }

    /// Opens the status editor over the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordNotFound` if the id is not on the current
    /// page, or `CoreError::ControllerClosed` if the actor has shut down.
    pub async fn open_status_editor(&self, id: impl Into<String>) -> Result<ViewState<R>, CoreError> {
        let id: String = id.into();
        self.request(|reply| Command::OpenStatusEditor { id, reply })
            .await?
    }

    /// Opens the read-only detail view over the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordNotFound` if the id is not on the current
    /// page, or `CoreError::ControllerClosed` if the actor has shut down.
    pub async fn open_detail(&self, id: impl Into<String>) -> Result<ViewState<R>, CoreError> {
        let id: String = id.into();
        self.request(|reply| Command::OpenDetail { id, reply }).await?
    }

    /// Closes any open dialog.
    pub fn close_dialog(&self) {
        let _ = self.tx.send(Command::CloseDialog);
    }

    /// Validates and saves the draft status through the open status editor.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error; the dialog stays open on
    /// failure.
    pub async fn save_status(
        &self,
        draft_status: impl Into<String>,
        draft_note: impl Into<String>,
    ) -> Result<(), CoreError> {
        let draft_status: String = draft_status.into();
        let draft_note: String = draft_note.into();
        self.request(|reply| Command::SaveStatus {
            draft_status,
            draft_note,
            reply,
        })
        .await?
    }

    /// Deletes a record after operator confirmation.
    ///
    /// # Errors
    ///
    /// Returns the backend error, or `CoreError::DeleteUnsupported` for
    /// read-only resources.
    pub async fn delete(&self, id: impl Into<String>) -> Result<DeleteOutcome, CoreError> {
        let id: String = id.into();
        self.request(|reply| Command::Delete { id, reply }).await?
    }

    /// Exports the entire filtered result set.
    ///
    /// # Errors
    ///
    /// Returns the export error; an empty result set is the
    /// `ExportOutcome::NoData` success case, not an error.
    pub async fn export(&self, format: ExportFormat) -> Result<ExportOutcome, CoreError> {
        self.request(|reply| Command::Export { format, reply }).await?
    }

    /// Returns a read-only snapshot of the controller state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ControllerClosed` if the actor has shut down.
    pub async fn snapshot(&self) -> Result<ViewState<R>, CoreError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command<R>,
    ) -> Result<T, CoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .map_err(|_| CoreError::ControllerClosed)?;
        reply_rx.await.map_err(|_| CoreError::ControllerClosed)
    }
}

struct ListActor<R: Resource, B: ListBackend<R> + 'static> {
    controller: ListController<R>,
    backend: Arc<B>,
    collaborators: Collaborators,
    internal_tx: mpsc::UnboundedSender<Internal<R>>,
    pending_fetch_replies: Vec<(u64, FetchReply<R>)>,
    debounce_deadline: Option<Instant>,
}

impl<R, B> ListActor<R, B>
where
    R: Resource,
    B: ListBackend<R> + 'static,
{
    async fn run(
        mut self,
        mut rx: mpsc::UnboundedReceiver<Command<R>>,
        mut internal_rx: mpsc::UnboundedReceiver<Internal<R>>,
    ) {
        loop {
            let deadline: Option<Instant> = self.debounce_deadline;
            tokio::select! {
                cmd = rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    // Every handle is gone; outstanding tasks have nothing
                    // left to report to.
                    None => break,
                },
                Some(internal) = internal_rx.recv() => self.handle_internal(internal),
                () = debounce_elapsed(deadline) => {
                    self.debounce_deadline = None;
                    self.start_fetch(None);
                }
            }
        }
        debug!(resource = R::REPORT_LABEL, "List controller shut down");
    }

    async fn handle_command(&mut self, cmd: Command<R>) {
        match cmd {
            Command::SetSearch(search) => {
                self.controller.set_search(search);
                self.arm_debounce();
            }
            Command::SetLimit(limit) => match self.controller.set_limit(limit) {
                Ok(()) => self.arm_debounce(),
                Err(err) => self.notify(NoticeLevel::Warning, &err.to_string()),
            },
            Command::SetDateRange(range) => {
                self.controller.set_date_range(range);
                self.arm_debounce();
            }
            Command::EditFacets(edit) => {
                self.controller.edit_facets(|facets| edit(facets));
                self.arm_debounce();
            }
            Command::ResetFilters => {
                self.controller.reset_filters();
                self.debounce_deadline = None;
                self.start_fetch(None);
            }
            Command::GoToPage { page, reply } => match self.controller.go_to_page(page) {
                Ok(()) => {
                    // The immediate fetch observes every prior edit.
                    self.debounce_deadline = None;
                    self.start_fetch(Some(reply));
                }
                Err(err) => {
                    let _ = reply.send(Err(err.into()));
                }
            },
            Command::Refresh { reply } => {
                self.debounce_deadline = None;
                self.start_fetch(Some(reply));
            }
            Command::OpenStatusEditor { id, reply } => {
                let result: Result<ViewState<R>, CoreError> = self
                    .controller
                    .open_status_editor(&id)
                    .map(|()| self.controller.snapshot());
                let _ = reply.send(result);
            }
            Command::OpenDetail { id, reply } => {
                let result: Result<ViewState<R>, CoreError> = self
                    .controller
                    .open_detail(&id)
                    .map(|()| self.controller.snapshot());
                let _ = reply.send(result);
            }
            Command::CloseDialog => self.controller.close_dialog(),
            Command::SaveStatus {
                draft_status,
                draft_note,
                reply,
            } => {
                let result: Result<(), CoreError> =
                    self.save_status(&draft_status, &draft_note).await;
                let _ = reply.send(result);
            }
            Command::Delete { id, reply } => {
                let result: Result<DeleteOutcome, CoreError> = self.delete(&id).await;
                let _ = reply.send(result);
            }
            Command::Export { format, reply } => self.start_export(format, reply),
            Command::Snapshot { reply } => {
                let _ = reply.send(self.controller.snapshot());
            }
        }
    }

    fn handle_internal(&mut self, internal: Internal<R>) {
        match internal {
            Internal::FetchCompleted { seq, outcome } => self.finish_fetch(seq, outcome),
            Internal::ExportCompleted {
                format,
                outcome,
                reply,
            } => {
                self.controller.finish_export();
                match &outcome {
                    Ok(ExportOutcome::Written(path)) => {
                        info!(
                            resource = R::REPORT_LABEL,
                            path = %path.display(),
                            "Export written"
                        );
                        self.notify(
                            NoticeLevel::Success,
                            &format!("{} file written to {}", format.label(), path.display()),
                        );
                    }
                    Ok(ExportOutcome::NoData) => {
                        self.notify(
                            NoticeLevel::Warning,
                            &format!("No {} data found for the selected filters", R::RECORD_NOUN),
                        );
                    }
                    Err(err) => {
                        error!(resource = R::REPORT_LABEL, error = %err, "Export failed");
                        self.notify(
                            NoticeLevel::Error,
                            &format!("Failed to export to {}: {err}", format.label()),
                        );
                    }
                }
                let _ = reply.send(outcome);
            }
        }
    }

    /// Arms (or re-arms) the debounce timer; only the most recent deadline
    /// ever fires.
    fn arm_debounce(&mut self) {
        self.debounce_deadline = Some(Instant::now() + DEBOUNCE_QUIET);
    }

    fn start_fetch(&mut self, reply: Option<FetchReply<R>>) {
        match self.controller.begin_fetch() {
            Ok(ticket) => {
                if let Some(reply) = reply {
                    self.pending_fetch_replies.push((ticket.seq, reply));
                }
                let backend: Arc<B> = Arc::clone(&self.backend);
                let internal_tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    let outcome: Result<PagedResult<R::Record>, BackendError> =
                        backend.list(&ticket.filters).await;
                    let _ = internal_tx.send(Internal::FetchCompleted {
                        seq: ticket.seq,
                        outcome,
                    });
                });
            }
            Err(err) => {
                self.notify(NoticeLevel::Warning, &err.to_string());
                if let Some(reply) = reply {
                    let _ = reply.send(Err(err.into()));
                }
            }
        }
    }

    fn finish_fetch(&mut self, seq: u64, outcome: Result<PagedResult<R::Record>, BackendError>) {
        let outcome: FetchOutcome = self.controller.complete_fetch(seq, outcome);

        match &outcome {
            FetchOutcome::Applied => {}
            FetchOutcome::Stale => {
                debug!(
                    resource = R::REPORT_LABEL,
                    seq, "Discarded stale fetch response"
                );
            }
            FetchOutcome::Failed(err) => {
                error!(resource = R::REPORT_LABEL, error = %err, "Fetch failed");
                self.notify(
                    NoticeLevel::Error,
                    &format!("Failed to fetch {}", R::PLURAL_NOUN),
                );
            }
        }

        // Resolve only the waiters of this fetch; others are still in
        // flight and will get their own completion.
        let mut remaining: Vec<(u64, FetchReply<R>)> = Vec::new();
        for (reply_seq, reply) in self.pending_fetch_replies.drain(..) {
            if reply_seq == seq {
                let result: Result<ViewState<R>, CoreError> = match &outcome {
                    FetchOutcome::Failed(err) => Err(CoreError::Backend(err.clone())),
                    FetchOutcome::Applied | FetchOutcome::Stale => {
                        Ok(self.controller.snapshot())
                    }
                };
                let _ = reply.send(result);
            } else {
                remaining.push((reply_seq, reply));
            }
        }
        self.pending_fetch_replies = remaining;
    }

    async fn save_status(&mut self, draft_status: &str, draft_note: &str) -> Result<(), CoreError> {
        let (id, change) = match self.controller.prepare_status_change(draft_status, draft_note) {
            Ok(prepared) => prepared,
            Err(err) => {
                self.notify(NoticeLevel::Warning, &err.to_string());
                return Err(err);
            }
        };

        match self.backend.update_status(&id, change).await {
            Ok(()) => {
                info!(resource = R::REPORT_LABEL, id = %id, "Status updated");
                self.notify(NoticeLevel::Success, "Status updated successfully");
                self.controller.close_dialog();
                self.start_fetch(None);
                Ok(())
            }
            Err(err) => {
                // Dialog stays open so the operator can retry.
                error!(resource = R::REPORT_LABEL, id = %id, error = %err, "Status update failed");
                self.notify(NoticeLevel::Error, "Failed to update status");
                Err(CoreError::Backend(err))
            }
        }
    }

    async fn delete(&mut self, id: &str) -> Result<DeleteOutcome, CoreError> {
        if !R::SUPPORTS_DELETE {
            return Err(CoreError::DeleteUnsupported {
                resource: R::REPORT_LABEL,
            });
        }

        let confirmed: bool = self
            .collaborators
            .confirm
            .confirm(
                &format!("Delete {}", R::RECORD_NOUN),
                &format!(
                    "Are you sure you want to delete this {}?",
                    R::RECORD_NOUN.to_lowercase()
                ),
            )
            .await;

        if !confirmed {
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.backend.delete(id).await {
            Ok(()) => {
                info!(resource = R::REPORT_LABEL, id = %id, "Record deleted");
                self.notify(
                    NoticeLevel::Success,
                    &format!("{} deleted successfully", R::RECORD_NOUN),
                );
                self.start_fetch(None);
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                error!(resource = R::REPORT_LABEL, id = %id, error = %err, "Delete failed");
                self.notify(
                    NoticeLevel::Error,
                    &format!("Failed to delete {}", R::RECORD_NOUN.to_lowercase()),
                );
                Err(CoreError::Backend(err))
            }
        }
    }

    fn start_export(
        &mut self,
        format: ExportFormat,
        reply: oneshot::Sender<Result<ExportOutcome, CoreError>>,
    ) {
        if let Err(err) = self.controller.begin_export() {
            self.notify(NoticeLevel::Warning, &err.to_string());
            let _ = reply.send(Err(err));
            return;
        }

        let backend: Arc<B> = Arc::clone(&self.backend);
        let filters = self.controller.filters().clone();
        let tabular: Arc<dyn TabularExporter> = Arc::clone(&self.collaborators.tabular);
        let document: Arc<dyn DocumentExporter> = Arc::clone(&self.collaborators.document);
        let internal_tx = self.internal_tx.clone();

        tokio::spawn(async move {
            let outcome: Result<ExportOutcome, CoreError> = run_export::<R, B>(
                backend.as_ref(),
                &filters,
                format,
                tabular.as_ref(),
                document.as_ref(),
            )
            .await;
            let _ = internal_tx.send(Internal::ExportCompleted {
                format,
                outcome,
                reply,
            });
        });
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.collaborators.notifier.notify(level, message);
    }
}

async fn debounce_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn run_export<R, B>(
    backend: &B,
    filters: &FilterState<R::Facets>,
    format: ExportFormat,
    tabular: &dyn TabularExporter,
    document: &dyn DocumentExporter,
) -> Result<ExportOutcome, CoreError>
where
    R: Resource,
    B: ListBackend<R>,
{
    let records: Vec<R::Record> = collect_all_records::<R, B>(backend, filters).await?;
    if records.is_empty() {
        return Ok(ExportOutcome::NoData);
    }

    let rows: Vec<Vec<String>> = build_rows::<R>(&records, format);
    let file_base: String = export_file_base(R::REPORT_LABEL);
    let path = match format {
        ExportFormat::Tabular => tabular.export(R::tabular_columns(), &rows, &file_base)?,
        ExportFormat::Document => document.export(
            R::document_columns(),
            &rows,
            R::DOCUMENT_TITLE,
            &R::document_subtitle(filters),
            &file_base,
        )?,
    };
    Ok(ExportOutcome::Written(path))
}
