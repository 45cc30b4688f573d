//! In-memory dataset: ordered column names plus rows of named cells.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Explicit null.
    Null,
    /// Numeric value.
    Number(f64),
    /// Text value (possibly empty).
    String(String),
}

impl CellValue {
    /// Whether the cell counts as empty: null, or text that trims to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Number(_) => false,
            CellValue::String(s) => s.trim().is_empty(),
        }
    }

    /// Get the text if this is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// String form of the value. Null renders as the empty string and
    /// integral numbers render without a fractional part.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Number(n) => Cow::Owned(format_number(*n)),
            CellValue::String(s) => Cow::Borrowed(s),
        }
    }

    /// Short name of the value kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// Render a number the way it would appear in a text export.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// A row: column name to cell value, in insertion order.
///
/// A row may omit declared columns; a missing key reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, CellValue>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (column, value) pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a cell; `None` means the column is absent from this row.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// Whether the cell under `column` is absent, null or blank text.
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).is_none_or(CellValue::is_blank)
    }

    /// Insert or replace a cell.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Take a cell out of the row, keeping the order of the rest.
    pub fn remove(&mut self, column: &str) -> Option<CellValue> {
        self.fields.shift_remove(column)
    }

    /// Iterate over present fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no present fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Structural key used for duplicate detection.
    pub fn key(&self) -> RowKey<'_> {
        RowKey(
            self.fields
                .iter()
                .map(|(k, v)| (k.as_str(), CellKey::from(v)))
                .collect(),
        )
    }
}

impl IntoIterator for Row {
    type Item = (String, CellValue);
    type IntoIter = indexmap::map::IntoIter<String, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, CellValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Comparison key for a single cell.
///
/// Total order: `Null < Number < String`. Numbers compare with
/// `f64::total_cmp` after `-0.0` is folded into `0.0`; NaN and infinities
/// fold into `Null`, matching their JSON text. A number never equals its
/// string form.
#[derive(Debug, Clone, Copy)]
pub enum CellKey<'a> {
    Null,
    Number(f64),
    String(&'a str),
}

impl<'a> From<&'a CellValue> for CellKey<'a> {
    fn from(value: &'a CellValue) -> Self {
        match value {
            CellValue::Null => CellKey::Null,
            CellValue::Number(n) if !n.is_finite() => CellKey::Null,
            CellValue::Number(n) if *n == 0.0 => CellKey::Number(0.0),
            CellValue::Number(n) => CellKey::Number(*n),
            CellValue::String(s) => CellKey::String(s),
        }
    }
}

impl CellKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            CellKey::Null => 0,
            CellKey::Number(_) => 1,
            CellKey::String(_) => 2,
        }
    }
}

impl Ord for CellKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellKey::Number(a), CellKey::Number(b)) => a.total_cmp(b),
            (CellKey::String(a), CellKey::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellKey<'_> {}

impl Hash for CellKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            CellKey::Null => {}
            CellKey::Number(n) => n.to_bits().hash(state),
            CellKey::String(s) => s.hash(state),
        }
    }
}

/// Structural key for a whole row: the ordered (column, cell) sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey<'a>(Vec<(&'a str, CellKey<'a>)>);

/// Tabular data: unique ordered column names plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Unchecked wire form of [`Dataset`].
#[derive(Deserialize)]
struct RawDataset {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = SieveError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Dataset::new(raw.headers, raw.rows)
    }
}

impl Dataset {
    /// Create a dataset, rejecting duplicate column names.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = std::collections::HashSet::with_capacity(headers.len());
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(SieveError::DuplicateColumn(header.clone()));
            }
        }
        Ok(Self { headers, rows })
    }

    /// Column names in order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get a cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Iterate over the cells under one column (absent cells yield `None`).
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// Split into headers and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.headers, self.rows)
    }

    /// Reassemble from parts that are already known to be unique.
    pub(crate) fn from_parts(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(" x ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_number_text() {
        assert_eq!(CellValue::Number(25.0).as_text(), "25");
        assert_eq!(CellValue::Number(8000.5).as_text(), "8000.5");
        assert_eq!(CellValue::Number(-0.0).as_text(), "0");
        assert_eq!(CellValue::Null.as_text(), "");
    }

    #[test]
    fn test_missing_column_is_blank() {
        let row = Row::from_pairs([("a", "1")]);
        assert!(row.is_blank("b"));
        assert!(!row.is_blank("a"));
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let err = Dataset::new(vec!["a".into(), "b".into(), "a".into()], Vec::new());
        assert!(matches!(err, Err(SieveError::DuplicateColumn(name)) if name == "a"));
    }

    #[test]
    fn test_number_and_string_keys_differ() {
        let a = Row::from_pairs([("salary", CellValue::Number(8000.5))]);
        let b = Row::from_pairs([("salary", CellValue::from("8000.5"))]);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_negative_zero_key() {
        let a = Row::from_pairs([("x", CellValue::Number(0.0))]);
        let b = Row::from_pairs([("x", CellValue::Number(-0.0))]);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_cell_key_order() {
        assert!(CellKey::Null < CellKey::Number(-1e9));
        assert!(CellKey::Number(1e9) < CellKey::String(""));
        assert!(CellKey::Number(1.0) < CellKey::Number(2.0));
        assert_eq!(CellKey::from(&CellValue::Number(f64::NAN)), CellKey::Null);
    }

    #[test]
    fn test_field_order_matters() {
        let a = Row::from_pairs([("a", "1"), ("b", "2")]);
        let b = Row::from_pairs([("b", "2"), ("a", "1")]);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_headers() {
        let err = serde_json::from_str::<Dataset>(r#"{"headers":["a","a"],"rows":[{"a":"x"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate column name: 'a'"));
    }

    #[test]
    fn test_dataset_serde_round_trip() {
        let dataset = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![Row::from_pairs([("a", CellValue::Number(1.0)), ("b", CellValue::from("x"))])],
        )
        .unwrap();
        let json = serde_json::to_string(&dataset).unwrap();
        assert_eq!(serde_json::from_str::<Dataset>(&json).unwrap(), dataset);
    }

    #[test]
    fn test_cell_value_serde_untagged() {
        let row = Row::from_pairs([
            ("a", CellValue::Null),
            ("b", CellValue::Number(2.5)),
            ("c", CellValue::from("x")),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"a":null,"b":2.5,"c":"x"}"#);
    }
}
