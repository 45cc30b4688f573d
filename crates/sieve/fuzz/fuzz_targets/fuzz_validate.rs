//! Fuzz target for column classification and cell validation.
//!
//! Splits the input into a column name and a value and runs the value
//! through the validator for that column, plus a fixed set of columns
//! covering every category. Date parsing and the numeric helpers see
//! arbitrary text here.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{CellValue, Dataset, Row, ValidationEngine};

const COLUMNS: [&str; 10] = [
    "age", "created_at", "email", "phone", "website", "id", "zipcode", "name", "status", "notes",
];

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let text = String::from_utf8_lossy(data).into_owned();
    let (column, value) = text.split_once('\n').unwrap_or(("field", text.as_str()));

    let mut headers: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    if !headers.iter().any(|h| h == column) {
        headers.push(column.to_string());
    }

    let row: Row = headers
        .iter()
        .map(|h| (h.clone(), CellValue::from(value)))
        .collect();

    if let Ok(dataset) = Dataset::new(headers, vec![row]) {
        let issues = ValidationEngine::new().validate(&dataset);
        for issue in issues {
            assert_eq!(issue.row, 1);
            assert!(issue.suggestion.is_some());
        }
    }
});
