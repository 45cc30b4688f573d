//! Record-array (JSON) reader.

use serde_json::Value;

use crate::error::{Result, SieveError};

use super::dataset::{CellValue, Dataset, Row};

/// Parse a JSON array of objects into a dataset.
///
/// Headers are the keys of the first record, in order. Later records may
/// carry extra keys; those cells stay in the row but are not declared.
pub fn parse_records(bytes: &[u8]) -> Result<Dataset> {
    let value: Value = serde_json::from_slice(bytes)?;

    let Value::Array(items) = value else {
        return Err(SieveError::UnsupportedFormat(
            "JSON input must be an array of objects".to_string(),
        ));
    };

    let Some(first) = items.first() else {
        return Err(SieveError::EmptyData("JSON array is empty".to_string()));
    };

    let headers: Vec<String> = match first {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => {
            return Err(SieveError::UnsupportedFormat(
                "JSON input must be an array of objects".to_string(),
            ));
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return Err(SieveError::UnsupportedFormat(
                "JSON input must be an array of objects".to_string(),
            ));
        };
        let row: Row = map
            .into_iter()
            .map(|(k, v)| (k, cell_from_json(v)))
            .collect();
        rows.push(row);
    }

    Dataset::new(headers, rows)
}

/// Convert a JSON value into a cell.
fn cell_from_json(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
        Value::String(s) => CellValue::String(s),
        Value::Bool(b) => CellValue::String(b.to_string()),
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let data = br#"[{"id":"U001","age":25,"email":null},{"id":"U002","age":"30"}]"#;
        let dataset = parse_records(data).unwrap();

        assert_eq!(dataset.headers(), &["id", "age", "email"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.get(0, "age"), Some(&CellValue::Number(25.0)));
        assert_eq!(dataset.get(0, "email"), Some(&CellValue::Null));
        assert_eq!(dataset.get(1, "age"), Some(&CellValue::from("30")));
        assert_eq!(dataset.get(1, "email"), None);
    }

    #[test]
    fn test_nested_values_become_text() {
        let data = br#"[{"tags":["a","b"],"active":true}]"#;
        let dataset = parse_records(data).unwrap();
        assert_eq!(dataset.get(0, "tags"), Some(&CellValue::from(r#"["a","b"]"#)));
        assert_eq!(dataset.get(0, "active"), Some(&CellValue::from("true")));
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_records(br#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, SieveError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_empty_array() {
        let err = parse_records(b"[]").unwrap_err();
        assert!(matches!(err, SieveError::EmptyData(_)));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse_records(b"[{").unwrap_err();
        assert!(matches!(err, SieveError::Json(_)));
    }
}
