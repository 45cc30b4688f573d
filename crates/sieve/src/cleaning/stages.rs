//! Cleaning stages: pure transforms from one dataset to the next.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::{CellValue, Dataset, Row};

/// One cleaning transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Drop rows where every declared column is blank.
    RemoveEmptyRows,
    /// Drop columns that are blank in every row.
    RemoveEmptyColumns,
    /// Trim surrounding whitespace from string cells.
    TrimWhitespace,
    /// Drop rows structurally equal to an earlier row.
    RemoveDuplicates,
}

impl Stage {
    /// All stages in execution order.
    pub const ORDER: [Stage; 4] = [
        Stage::RemoveEmptyRows,
        Stage::RemoveEmptyColumns,
        Stage::TrimWhitespace,
        Stage::RemoveDuplicates,
    ];

    /// Stage identifier used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::RemoveEmptyRows => "remove_empty_rows",
            Stage::RemoveEmptyColumns => "remove_empty_columns",
            Stage::TrimWhitespace => "trim_whitespace",
            Stage::RemoveDuplicates => "remove_duplicates",
        }
    }

    /// Get a human-readable description of the stage.
    pub fn description(&self) -> &'static str {
        match self {
            Stage::RemoveEmptyRows => "Remove empty rows",
            Stage::RemoveEmptyColumns => "Remove empty columns",
            Stage::TrimWhitespace => "Trim whitespace",
            Stage::RemoveDuplicates => "Remove duplicate rows",
        }
    }

    /// Run the stage.
    pub fn apply(&self, dataset: Dataset) -> Dataset {
        match self {
            Stage::RemoveEmptyRows => remove_empty_rows(dataset),
            Stage::RemoveEmptyColumns => remove_empty_columns(dataset),
            Stage::TrimWhitespace => trim_whitespace(dataset),
            Stage::RemoveDuplicates => remove_duplicates(dataset),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drop every row in which all declared columns are null, absent, or blank.
pub fn remove_empty_rows(dataset: Dataset) -> Dataset {
    let (headers, rows) = dataset.into_parts();
    let rows = rows
        .into_iter()
        .filter(|row| !headers.iter().all(|h| row.is_blank(h)))
        .collect();
    Dataset::from_parts(headers, rows)
}

/// Drop every column that is blank in all rows. Surviving rows keep only
/// the surviving columns, in header order.
pub fn remove_empty_columns(dataset: Dataset) -> Dataset {
    let (headers, rows) = dataset.into_parts();

    let kept: Vec<String> = headers
        .into_iter()
        .filter(|h| !rows.iter().all(|row| row.is_blank(h)))
        .collect();

    let rows = rows
        .into_iter()
        .map(|row| retain_columns(row, &kept))
        .collect();

    Dataset::from_parts(kept, rows)
}

fn retain_columns(mut row: Row, columns: &[String]) -> Row {
    columns
        .iter()
        .filter_map(|column| row.remove(column).map(|value| (column.clone(), value)))
        .collect()
}

/// Replace every string cell with its trimmed form.
pub fn trim_whitespace(dataset: Dataset) -> Dataset {
    let (headers, rows) = dataset.into_parts();
    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(column, value)| match value {
                    CellValue::String(s) if s.trim().len() != s.len() => {
                        (column, CellValue::String(s.trim().to_string()))
                    }
                    other => (column, other),
                })
                .collect()
        })
        .collect();
    Dataset::from_parts(headers, rows)
}

/// Keep the first occurrence of each structurally distinct row.
///
/// Equality covers every present field in order, so a number never equals
/// its string form and rows with the same fields in a different order differ.
pub fn remove_duplicates(dataset: Dataset) -> Dataset {
    let (headers, rows) = dataset.into_parts();

    let mut keep = Vec::with_capacity(rows.len());
    {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            keep.push(seen.insert(row.key()));
        }
    }

    let rows = rows
        .into_iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect();
    Dataset::from_parts(headers, rows)
}
