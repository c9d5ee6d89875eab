// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Export-all assembly loop behavior.

use std::sync::Arc;
use std::time::Duration;

use crate::actor::{ListHandle, spawn_controller};
use crate::error::CoreError;
use crate::export::{EXPORT_MAX_PAGES, EXPORT_PAGE_SIZE, ExportFormat, ExportOutcome};
use crate::resources::{Complaints, TyfcbSummary};
use crate::tests::helpers::{
    PagedBackend, RunawayBackend, TestCollab, complaints, settle, tyfcb_summary,
};
use crate::traits::NoticeLevel;

#[tokio::test(start_paused = true)]
async fn test_export_accumulates_every_page() {
    let backend: Arc<PagedBackend<Complaints>> =
        Arc::new(PagedBackend::with_records(complaints(2500)));
    let collab: TestCollab = TestCollab::new();
    let handle: ListHandle<Complaints> =
        spawn_controller(Arc::clone(&backend), collab.collaborators());

    let outcome = handle
        .export(ExportFormat::Tabular)
        .await
        .expect("export succeeds");

    assert!(matches!(outcome, ExportOutcome::Written(_)));

    // 2500 records at 1000 per page: pages 1, 2, 3, stopping on the page
    // that reports no successor.
    let calls = backend.list_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    for (index, call) in calls.iter().enumerate() {
        assert_eq!(call.limit(), EXPORT_PAGE_SIZE);
        assert_eq!(call.page(), u32::try_from(index).unwrap() + 1);
    }

    let export = collab.tabular.calls.lock().unwrap()[0].clone();
    assert_eq!(export.columns.len(), 7);
    assert_eq!(export.rows.len(), 2500);
    assert!(export.file_base.starts_with("Complaints_"));
    assert_eq!(export.file_base.len(), "Complaints_".len() + 8);

    // Serial numbers run across page boundaries.
    assert_eq!(export.rows[0][0], "1");
    assert_eq!(export.rows[2499][0], "2500");

    assert_eq!(collab.notifier.count_level(NoticeLevel::Success), 1);
}

#[tokio::test(start_paused = true)]
async fn test_export_with_no_rows_reports_no_data_without_a_file() {
    let backend: Arc<PagedBackend<Complaints>> = Arc::new(PagedBackend::with_records(Vec::new()));
    let collab: TestCollab = TestCollab::new();
    let handle: ListHandle<Complaints> =
        spawn_controller(Arc::clone(&backend), collab.collaborators());

    let outcome = handle
        .export(ExportFormat::Tabular)
        .await
        .expect("empty export is not an error");

    assert_eq!(outcome, ExportOutcome::NoData);
    assert_eq!(collab.tabular.call_count(), 0);
    assert_eq!(collab.notifier.count_level(NoticeLevel::Warning), 1);
    assert_eq!(collab.notifier.count_level(NoticeLevel::Error), 0);
    let messages = collab.notifier.messages();
    assert_eq!(
        messages[0].1,
        "No Complaint data found for the selected filters"
    );
}

#[tokio::test(start_paused = true)]
async fn test_export_aborts_when_backend_never_reports_a_final_page() {
    let backend: Arc<RunawayBackend> = Arc::new(RunawayBackend);
    let collab: TestCollab = TestCollab::new();
    let handle: ListHandle<Complaints> =
        spawn_controller(Arc::clone(&backend), collab.collaborators());

    let outcome = handle.export(ExportFormat::Tabular).await;

    assert_eq!(
        outcome,
        Err(CoreError::ExportPageOverflow {
            pages: EXPORT_MAX_PAGES
        })
    );
    assert_eq!(collab.tabular.call_count(), 0);
    assert_eq!(collab.notifier.count_level(NoticeLevel::Error), 1);
}

#[tokio::test(start_paused = true)]
async fn test_second_export_is_refused_while_one_runs() {
    let backend: Arc<PagedBackend<Complaints>> =
        Arc::new(PagedBackend::with_records(complaints(5)));
    backend.queue_list_delay(Duration::from_millis(200));
    let collab: TestCollab = TestCollab::new();
    let handle: ListHandle<Complaints> =
        spawn_controller(Arc::clone(&backend), collab.collaborators());

    let first = handle.clone();
    let running = tokio::spawn(async move { first.export(ExportFormat::Tabular).await });
    // Let the actor start the export before the second request lands.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let refused = handle.export(ExportFormat::Tabular).await;
    assert_eq!(refused, Err(CoreError::ExportInProgress));

    let finished = running.await.expect("task joins").expect("export succeeds");
    assert!(matches!(finished, ExportOutcome::Written(_)));

    // The flag clears once the first export completes.
    settle().await;
    let after = handle.export(ExportFormat::Tabular).await.expect("flag cleared");
    assert!(matches!(after, ExportOutcome::Written(_)));
}

#[tokio::test(start_paused = true)]
async fn test_export_failure_surfaces_error_notification() {
    let backend: Arc<PagedBackend<Complaints>> =
        Arc::new(PagedBackend::with_records(complaints(3)));
    let collab: TestCollab = TestCollab::new();
    collab.tabular.fail_exports(true);
    let handle: ListHandle<Complaints> =
        spawn_controller(Arc::clone(&backend), collab.collaborators());

    let outcome = handle.export(ExportFormat::Tabular).await;

    assert!(matches!(outcome, Err(CoreError::Export(_))));
    assert_eq!(collab.notifier.count_level(NoticeLevel::Error), 1);

    // A failed export still releases the guard.
    let state = handle.snapshot().await.expect("controller alive");
    assert!(!state.exporting);
}

#[tokio::test(start_paused = true)]
async fn test_document_export_carries_title_and_subtitle() {
    let backend: Arc<PagedBackend<TyfcbSummary>> =
        Arc::new(PagedBackend::with_records(vec![tyfcb_summary(1)]));
    let collab: TestCollab = TestCollab::new();
    let handle: ListHandle<TyfcbSummary> =
        spawn_controller(Arc::clone(&backend), collab.collaborators());

    handle.edit_facets(|facets| facets.chapter_name = Some(String::from("North Chapter")));
    settle().await;

    let outcome = handle
        .export(ExportFormat::Document)
        .await
        .expect("export succeeds");
    assert!(matches!(outcome, ExportOutcome::Written(_)));

    let call = collab.document.calls.lock().unwrap()[0].clone();
    assert_eq!(call.columns.len(), 7);
    assert_eq!(call.title, "TYFCB Summary Report");
    assert_eq!(call.subtitle, "Chapter: North Chapter");
    assert!(call.file_base.starts_with("TYFCB_Summary_"));
    // Document rows use compact amount notation.
    assert_eq!(call.rows[0][3], "₹3.50L");
}
