use dps_core::errors::{DpsError, ErrorInfo};
use dps_exp::Table;
use serde::{Deserialize, Serialize};

/// One labelled line of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// Numeric view of a sweep table: a shared integer x axis and float series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x: Vec<i64>,
    pub series: Vec<Series>,
}

impl Chart {
    /// Smallest and largest y value over every series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|series| series.values.iter().copied())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}

/// Parses `table` into a [`Chart`].
///
/// Row 0 must hold integer step indices after its label cell, and every
/// other row must hold one float per step.
pub fn chart_from_table(table: &Table, title: &str) -> Result<Chart, DpsError> {
    let header = table
        .header()
        .ok_or_else(|| malformed("table-empty", "table has no header row", title, 0))?;
    let x = header
        .iter()
        .enumerate()
        .skip(1)
        .map(|(col, cell)| {
            cell.trim().parse::<i64>().map_err(|_| {
                let message = "header cell is not an integer";
                malformed_cell("x-not-integer", message, title, 0, col, cell)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut series = Vec::with_capacity(table.series().len());
    for (offset, row) in table.series().iter().enumerate() {
        let row_idx = offset + 1;
        let label = row.first().cloned().unwrap_or_default();
        let values = row
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, cell)| {
                cell.trim().parse::<f64>().map_err(|_| {
                    let message = "result cell is not a number";
                    malformed_cell("y-not-float", message, title, row_idx, col, cell)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != x.len() {
            return Err(DpsError::Output(
                info("series-length", "series length differs from the x axis", title, row_idx)
                    .with_context("expected", x.len())
                    .with_context("found", values.len()),
            ));
        }
        series.push(Series { label, values });
    }

    Ok(Chart {
        title: title.to_string(),
        x,
        series,
    })
}

fn info(code: &str, message: &str, file: &str, row: usize) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("file", file)
        .with_context("row", row)
}

fn malformed(code: &str, message: &str, file: &str, row: usize) -> DpsError {
    DpsError::Output(info(code, message, file, row))
}

fn malformed_cell(
    code: &str,
    message: &str,
    file: &str,
    row: usize,
    col: usize,
    cell: &str,
) -> DpsError {
    DpsError::Output(
        info(code, message, file, row)
            .with_context("column", col)
            .with_context("cell", cell),
    )
}
