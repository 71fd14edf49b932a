use std::fs;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use dps_core::errors::{DpsError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Cell delimiter of table files.
pub const DELIMITER: u8 = b',';

/// Row-oriented sweep table; row 0 is the step header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Table holding only the header row `x, [0,] 1..=steps`.
    pub fn with_header(steps: u32, include_baseline: bool) -> Self {
        let start = if include_baseline { 0 } else { 1 };
        let header = std::iter::once("x".to_string())
            .chain((start..=steps).map(|step| step.to_string()))
            .collect();
        Self { rows: vec![header] }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header.
    pub fn series(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Writes `table` to `path`, replacing any existing file.
///
/// Cells are written verbatim; they are numbers or plain labels and are
/// never quoted.
pub fn write_table(table: &Table, path: &Path) -> Result<(), DpsError> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|err| wrap_csv("table-open", path, err))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|err| wrap_csv("table-write-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_csv("table-flush", path, err.into()))?;
    Ok(())
}

/// Reads a table file written by [`write_table`].
pub fn read_table(path: &Path) -> Result<Table, DpsError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(DELIMITER)
        .from_path(path)
        .map_err(|err| wrap_csv("table-open", path, err))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| wrap_csv("table-read-row", path, err))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table { rows })
}

fn ensure_parent(path: &Path) -> Result<(), DpsError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            DpsError::Table(
                ErrorInfo::new("table-mkdir", "failed to create table directory")
                    .with_context("path", parent.display())
                    .with_hint(err.to_string()),
            )
        })?;
    }
    Ok(())
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> DpsError {
    DpsError::Table(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_spans_requested_steps() {
        let table = Table::with_header(3, false);
        assert_eq!(table.rows, vec![vec!["x", "1", "2", "3"]]);
        let table = Table::with_header(2, true);
        assert_eq!(table.rows, vec![vec!["x", "0", "1", "2"]]);
    }

    #[test]
    fn zero_steps_leave_only_label_and_baseline() {
        assert_eq!(Table::with_header(0, false).column_count(), 1);
        assert_eq!(Table::with_header(0, true).column_count(), 2);
        assert!(Table::with_header(0, true).series().is_empty());
    }
}
