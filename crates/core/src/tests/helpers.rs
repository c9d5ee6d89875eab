// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test doubles for the controller's collaborators and backend.

use async_trait::async_trait;
use chapter_desk_domain::{
    Complaint, ComplaintCategory, ComplaintStatus, FilterState, PagedResult, TyfcbMemberSummary,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::actor::Collaborators;
use crate::resources::Complaints;
use crate::traits::{
    BackendError, ColumnSpec, ConfirmPrompt, DocumentExporter, ExportError, ListBackend,
    NoticeLevel, Notifier, Resource, StatusChange, TabularExporter,
};

/// Builds a complaint with predictable fields from an index.
pub fn complaint(n: usize) -> Complaint {
    Complaint {
        id: format!("c{n}"),
        member_name: format!("Member {n}"),
        subject: format!("Subject {n}"),
        description: format!("Description {n}"),
        category: ComplaintCategory::General,
        status: ComplaintStatus::Pending,
        admin_response: None,
        created_at: String::from("2026-08-01T10:00:00Z"),
    }
}

/// Builds `n` complaints.
pub fn complaints(n: usize) -> Vec<Complaint> {
    (0..n).map(complaint).collect()
}

/// Builds a TYFCB member summary with predictable fields.
pub fn tyfcb_summary(n: usize) -> TyfcbMemberSummary {
    TyfcbMemberSummary {
        member_name: format!("Member {n}"),
        chapter_name: String::from("North Chapter"),
        total_amount: 350_000.0,
        transaction_count: 4,
        average_amount: 87_500.0,
        first_transaction: Some(String::from("2026-07-02")),
        last_transaction: Some(String::from("2026-07-28")),
    }
}

/// An in-memory backend serving pages out of a fixed record set.
///
/// The record set stands for the already-filtered result; list calls are
/// recorded so tests can assert the exact queries issued. Optional per-call
/// delays let paused-time tests order completions.
pub struct PagedBackend<R: Resource> {
    records: Mutex<Vec<R::Record>>,
    pub list_calls: Mutex<Vec<FilterState<R::Facets>>>,
    pub status_calls: Mutex<Vec<(String, StatusChange)>>,
    pub delete_calls: Mutex<Vec<String>>,
    list_delays: Mutex<VecDeque<Duration>>,
    fail_list: AtomicBool,
    fail_status: AtomicBool,
    fail_delete: AtomicBool,
}

impl<R: Resource> PagedBackend<R> {
    pub fn with_records(records: Vec<R::Record>) -> Self {
        Self {
            records: Mutex::new(records),
            list_calls: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            list_delays: Mutex::new(VecDeque::new()),
            fail_list: AtomicBool::new(false),
            fail_status: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    pub fn queue_list_delay(&self, delay: Duration) {
        self.list_delays.lock().unwrap().push_back(delay);
    }

    pub fn fail_next_lists(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl<R: Resource> ListBackend<R> for PagedBackend<R> {
    async fn list(
        &self,
        filters: &FilterState<R::Facets>,
    ) -> Result<PagedResult<R::Record>, BackendError> {
        let delay: Option<Duration> = self.list_delays.lock().unwrap().pop_front();
        self.list_calls.lock().unwrap().push(filters.clone());

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(BackendError::Network {
                message: String::from("connection refused"),
            });
        }

        let records = self.records.lock().unwrap();
        let total: u64 = records.len() as u64;
        let limit: u32 = filters.limit();
        let page: u32 = filters.page();
        let total_pages: u32 = u32::try_from(total.div_ceil(u64::from(limit))).unwrap();

        let start: usize = ((page - 1) * limit) as usize;
        let end: usize = (start + limit as usize).min(records.len());
        let items: Vec<R::Record> = if start < records.len() {
            records[start..end].to_vec()
        } else {
            Vec::new()
        };

        Ok(PagedResult::new(items, total, page, limit, total_pages).unwrap())
    }

    async fn update_status(&self, id: &str, change: StatusChange) -> Result<(), BackendError> {
        self.status_calls
            .lock()
            .unwrap()
            .push((id.to_string(), change));
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(BackendError::Server {
                status: 500,
                message: String::from("update failed"),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.delete_calls.lock().unwrap().push(id.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(BackendError::Server {
                status: 500,
                message: String::from("delete failed"),
            });
        }
        Ok(())
    }
}

/// A backend replaying a scripted queue of delayed responses.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<(Duration, Result<PagedResult<Complaint>, BackendError>)>>,
    pub list_calls: Mutex<Vec<FilterState<<Complaints as Resource>::Facets>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            list_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_response(
        &self,
        delay: Duration,
        response: Result<PagedResult<Complaint>, BackendError>,
    ) {
        self.responses.lock().unwrap().push_back((delay, response));
    }
}

#[async_trait]
impl ListBackend<Complaints> for ScriptedBackend {
    async fn list(
        &self,
        filters: &FilterState<<Complaints as Resource>::Facets>,
    ) -> Result<PagedResult<Complaint>, BackendError> {
        self.list_calls.lock().unwrap().push(filters.clone());
        let (delay, response) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedBackend ran out of responses");
        tokio::time::sleep(delay).await;
        response
    }
}

/// A backend whose every page claims further pages exist.
pub struct RunawayBackend;

#[async_trait]
impl ListBackend<Complaints> for RunawayBackend {
    async fn list(
        &self,
        filters: &FilterState<<Complaints as Resource>::Facets>,
    ) -> Result<PagedResult<Complaint>, BackendError> {
        // total_pages far beyond the cap keeps has_next set forever.
        Ok(PagedResult::new(
            vec![complaint(filters.page() as usize)],
            u64::from(u32::MAX),
            filters.page(),
            filters.limit(),
            u32::MAX,
        )
        .unwrap())
    }
}

/// Captures notifications for assertions.
#[derive(Default)]
pub struct TestNotifier {
    messages: Mutex<Vec<(NoticeLevel, String)>>,
}

impl TestNotifier {
    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count_level(&self, level: NoticeLevel) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

impl Notifier for TestNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

/// Answers every confirmation prompt with a fixed choice.
pub struct TestConfirm {
    answer: bool,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl TestConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConfirmPrompt for TestConfirm {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        self.prompts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        self.answer
    }
}

/// One captured tabular export call.
#[derive(Debug, Clone)]
pub struct TabularCall {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
    pub file_base: String,
}

/// Captures tabular exports without touching the filesystem.
#[derive(Default)]
pub struct TestTabular {
    pub calls: Mutex<Vec<TabularCall>>,
    fail: AtomicBool,
}

impl TestTabular {
    pub fn fail_exports(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl TabularExporter for TestTabular {
    fn export(
        &self,
        columns: &[ColumnSpec],
        rows: &[Vec<String>],
        file_base: &str,
    ) -> Result<PathBuf, ExportError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ExportError::Io {
                path: format!("{file_base}.csv"),
                message: String::from("disk full"),
            });
        }
        self.calls.lock().unwrap().push(TabularCall {
            columns: columns.to_vec(),
            rows: rows.to_vec(),
            file_base: file_base.to_string(),
        });
        Ok(PathBuf::from(format!("/exports/{file_base}.csv")))
    }
}

/// One captured document export call.
#[derive(Debug, Clone)]
pub struct DocumentCall {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
    pub title: String,
    pub subtitle: String,
    pub file_base: String,
}

/// Captures document exports without touching the filesystem.
#[derive(Default)]
pub struct TestDocument {
    pub calls: Mutex<Vec<DocumentCall>>,
}

impl DocumentExporter for TestDocument {
    fn export(
        &self,
        columns: &[ColumnSpec],
        rows: &[Vec<String>],
        title: &str,
        subtitle: &str,
        file_base: &str,
    ) -> Result<PathBuf, ExportError> {
        self.calls.lock().unwrap().push(DocumentCall {
            columns: columns.to_vec(),
            rows: rows.to_vec(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            file_base: file_base.to_string(),
        });
        Ok(PathBuf::from(format!("/exports/{file_base}.txt")))
    }
}

/// The full set of test collaborators, kept for post-run inspection.
pub struct TestCollab {
    pub notifier: Arc<TestNotifier>,
    pub confirm: Arc<TestConfirm>,
    pub tabular: Arc<TestTabular>,
    pub document: Arc<TestDocument>,
}

impl TestCollab {
    pub fn new() -> Self {
        Self::confirming(true)
    }

    pub fn confirming(answer: bool) -> Self {
        Self {
            notifier: Arc::new(TestNotifier::default()),
            confirm: Arc::new(TestConfirm::answering(answer)),
            tabular: Arc::new(TestTabular::default()),
            document: Arc::new(TestDocument::default()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            notifier: self.notifier.clone(),
            confirm: self.confirm.clone(),
            tabular: self.tabular.clone(),
            document: self.document.clone(),
        }
    }
}

/// Advances paused time far enough for any pending debounce and spawned
/// fetch to settle.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(600)).await;
}
