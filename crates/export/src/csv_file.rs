// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreadsheet-style export via CSV.

use chapter_desk::{ColumnSpec, ExportError, TabularExporter};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::check_row_widths;

/// Writes exports as CSV files into a fixed output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_dir: PathBuf,
}

impl CsvExporter {
    /// Creates an exporter writing into `out_dir`.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

fn io_error(path: &Path, err: &csv::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl TabularExporter for CsvExporter {
    fn export(
        &self,
        columns: &[ColumnSpec],
        rows: &[Vec<String>],
        file_base: &str,
    ) -> Result<PathBuf, ExportError> {
        check_row_widths(columns, rows)?;

        let path: PathBuf = self.out_dir.join(format!("{file_base}.csv"));
        let mut writer = csv::Writer::from_path(&path).map_err(|err| io_error(&path, &err))?;

        writer
            .write_record(columns.iter().map(|column| column.header))
            .map_err(|err| io_error(&path, &err))?;
        for row in rows {
            writer
                .write_record(row)
                .map_err(|err| io_error(&path, &err))?;
        }
        writer.flush().map_err(|err| ExportError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        info!(path = %path.display(), rows = rows.len(), "CSV export written");
        Ok(path)
    }
}
