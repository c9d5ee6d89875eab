// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Titled, column-described report export.
//!
//! Renders a fixed-width text table under a title and subtitle line. This
//! is the document-style counterpart to the CSV exporter: same row
//! contract, presentation-oriented output.

use chapter_desk::{ColumnSpec, DocumentExporter, ExportError};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use crate::check_row_widths;

/// Writes exports as fixed-width text reports into an output directory.
#[derive(Debug, Clone)]
pub struct TextReportExporter {
    out_dir: PathBuf,
}

impl TextReportExporter {
    /// Creates an exporter writing into `out_dir`.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

/// Width of each column: the widest cell, headers included.
fn column_widths(columns: &[ColumnSpec], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|column| column.header.chars().count())
        .collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }
    widths
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}", width = widths[index]);
    }
    line.trim_end().to_string()
}

impl DocumentExporter for TextReportExporter {
    fn export(
        &self,
        columns: &[ColumnSpec],
        rows: &[Vec<String>],
        title: &str,
        subtitle: &str,
        file_base: &str,
    ) -> Result<PathBuf, ExportError> {
        check_row_widths(columns, rows)?;

        let widths: Vec<usize> = column_widths(columns, rows);
        let headers: Vec<&str> = columns.iter().map(|column| column.header).collect();

        let mut body: String = String::new();
        body.push_str(title);
        body.push('\n');
        body.push_str(subtitle);
        body.push_str("\n\n");
        body.push_str(&render_row(&headers, &widths));
        body.push('\n');
        let rule_width: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        body.push_str(&"-".repeat(rule_width));
        body.push('\n');
        for row in rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            body.push_str(&render_row(&cells, &widths));
            body.push('\n');
        }

        let path: PathBuf = self.out_dir.join(format!("{file_base}.txt"));
        std::fs::write(&path, body).map_err(|err| ExportError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        info!(path = %path.display(), rows = rows.len(), "Report export written");
        Ok(path)
    }
}
