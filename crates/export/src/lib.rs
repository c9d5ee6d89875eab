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

mod csv_file;
mod report;

pub use csv_file::CsvExporter;
pub use report::TextReportExporter;

use chapter_desk::{ColumnSpec, ExportError};

/// Rejects rows whose cell count differs from the column schema.
fn check_row_widths(columns: &[ColumnSpec], rows: &[Vec<String>]) -> Result<(), ExportError> {
    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns.len() {
            return Err(ExportError::RaggedRow {
                row: index,
                found: row.len(),
                expected: columns.len(),
            });
        }
    }
    Ok(())
}
