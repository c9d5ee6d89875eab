// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Full-dataset export assembly.
//!
//! The visible page is only a window: export walks the entire filtered
//! result set page by page, one outstanding request at a time, until the
//! backend reports no further page. A hard page cap guards against a
//! backend that never clears `has_next`.

use chapter_desk_domain::{FilterState, PagedResult};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::traits::{ListBackend, Resource};

/// Page size used by the export pagination loop.
pub const EXPORT_PAGE_SIZE: u32 = 1000;

/// Maximum number of pages the export loop will fetch before aborting.
pub const EXPORT_MAX_PAGES: u32 = 1000;

/// The requested export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Spreadsheet-style tabular file.
    Tabular,
    /// Titled, column-described document.
    Document,
}

impl ExportFormat {
    /// Human-readable name used in notifications.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tabular => "CSV",
            Self::Document => "report",
        }
    }
}

/// Outcome of a completed export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written to the returned path.
    Written(PathBuf),
    /// The filtered set was empty; no file was produced.
    NoData,
}

/// Collects every record of the filtered set by walking pages sequentially.
///
/// The caller's page and page size are ignored: the loop always starts at
/// page 1 with [`EXPORT_PAGE_SIZE`] records per page and stops when the
/// backend reports `has_next == false`.
///
/// # Errors
///
/// Returns `CoreError::Backend` if any page fetch fails, or
/// `CoreError::ExportPageOverflow` if the backend still reports further
/// pages after [`EXPORT_MAX_PAGES`] fetches.
pub async fn collect_all_records<R, B>(
    backend: &B,
    filters: &FilterState<R::Facets>,
) -> Result<Vec<R::Record>, CoreError>
where
    R: Resource,
    B: ListBackend<R>,
{
    let mut query: FilterState<R::Facets> = filters.clone();
    query.set_limit(EXPORT_PAGE_SIZE)?;

    let mut records: Vec<R::Record> = Vec::new();
    let mut page: u32 = 1;

    loop {
        query.set_page(page)?;
        let result: PagedResult<R::Record> = backend.list(&query).await?;
        debug!(
            resource = R::REPORT_LABEL,
            page,
            fetched = result.len(),
            total = result.total_items,
            "Collected export page"
        );
        records.extend(result.items);

        if !result.has_next {
            return Ok(records);
        }

        if page >= EXPORT_MAX_PAGES {
            warn!(
                resource = R::REPORT_LABEL,
                pages = EXPORT_MAX_PAGES,
                "Export aborted: backend never reported a final page"
            );
            return Err(CoreError::ExportPageOverflow {
                pages: EXPORT_MAX_PAGES,
            });
        }

        page += 1;
    }
}

/// Builds the export file base name: `{ReportLabel}_{YYYYMMDD}`.
#[must_use]
pub fn export_file_base(report_label: &str) -> String {
    let format = format_description!("[year][month][day]");
    let stamp: String = OffsetDateTime::now_utc()
        .date()
        .format(&format)
        .unwrap_or_else(|_| OffsetDateTime::now_utc().date().to_string());
    format!("{report_label}_{stamp}")
}

/// Maps accumulated records to export rows using the resource's schema.
#[must_use]
pub fn build_rows<R: Resource>(records: &[R::Record], format: ExportFormat) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match format {
            ExportFormat::Tabular => R::tabular_row(record, index),
            ExportFormat::Document => R::document_row(record, index),
        })
        .collect()
}

/// Strips embedded line breaks and tabs so a value stays on one export row.
#[must_use]
pub fn sanitize_cell(value: &str) -> String {
    value.replace(['\r', '\n', '\t'], " ")
}
