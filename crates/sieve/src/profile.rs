//! Dataset profiling: a quick look at shape and emptiness before cleaning.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::{Dataset, Row};
use crate::validation::{classify, Category};

/// Per-column profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Category inferred from the name.
    pub category: Category,
    /// Null, absent or blank cells.
    pub missing: usize,
    /// Cells with content.
    pub non_missing: usize,
    /// Value kinds seen among present cells, with counts.
    pub kinds: IndexMap<String, usize>,
}

impl ColumnProfile {
    /// Whether every cell in the column is missing.
    pub fn is_empty(&self) -> bool {
        self.non_missing == 0
    }
}

/// Profile of a whole dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    /// Columns with no content in any row.
    pub empty_columns: Vec<String>,
    /// Rows with no content in any column.
    pub blank_rows: usize,
    /// Rows structurally equal to an earlier row.
    pub duplicate_rows: usize,
    /// First rows of the dataset.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub preview: Vec<Row>,
}

impl DatasetProfile {
    /// Profile a dataset, keeping up to `preview_rows` rows for display.
    pub fn from_dataset(dataset: &Dataset, preview_rows: usize) -> Self {
        let columns: Vec<ColumnProfile> = dataset
            .headers()
            .iter()
            .map(|header| profile_column(dataset, header))
            .collect();

        let empty_columns = columns
            .iter()
            .filter(|c| c.is_empty())
            .map(|c| c.name.clone())
            .collect();

        let blank_rows = dataset
            .rows()
            .iter()
            .filter(|row| dataset.headers().iter().all(|h| row.is_blank(h)))
            .count();

        let mut seen = HashSet::with_capacity(dataset.row_count());
        let duplicate_rows = dataset
            .rows()
            .iter()
            .filter(|&row| !seen.insert(row.key()))
            .count();

        Self {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns,
            empty_columns,
            blank_rows,
            duplicate_rows,
            preview: dataset.rows().iter().take(preview_rows).cloned().collect(),
        }
    }

    /// Whether the dataset has anything the cleaning stages would remove.
    pub fn needs_cleaning(&self) -> bool {
        !self.empty_columns.is_empty() || self.blank_rows > 0 || self.duplicate_rows > 0
    }
}

fn profile_column(dataset: &Dataset, column: &str) -> ColumnProfile {
    let mut missing = 0;
    let mut kinds: IndexMap<String, usize> = IndexMap::new();

    for value in dataset.column_values(column) {
        match value {
            Some(v) if !v.is_blank() => *kinds.entry(v.kind().to_string()).or_insert(0) += 1,
            _ => missing += 1,
        }
    }

    ColumnProfile {
        name: column.to_string(),
        category: classify(column),
        missing,
        non_missing: dataset.row_count() - missing,
        kinds,
    }
}
