//! Spreadsheet (xlsx/xls/ods) reader.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::error::{Result, SieveError};

use super::dataset::{CellValue, Dataset, Row};
use super::parser::header_name;

/// Read the first worksheet of a workbook. The first row holds the headers.
pub fn read_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        SieveError::Spreadsheet(format!("Failed to open '{}': {}", path.display(), e))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SieveError::EmptyData("Workbook has no worksheets".to_string()))?
        .map_err(|e| SieveError::Spreadsheet(format!("Failed to read worksheet: {}", e)))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter
        .next()
        .ok_or_else(|| SieveError::EmptyData("Worksheet is empty".to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(&cell_text(cell), i))
        .collect();

    let rows: Vec<Row> = rows_iter
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let value = cells
                        .get(i)
                        .map_or_else(|| CellValue::String(String::new()), cell_value);
                    (h.clone(), value)
                })
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return Err(SieveError::EmptyData("Worksheet has no data rows".to_string()));
    }

    Dataset::new(headers, rows)
}

/// Convert a worksheet cell. Empty cells read as empty text.
fn cell_value(cell: &Data) -> CellValue {
    if cell.is_empty() {
        CellValue::String(String::new())
    } else if let Some(s) = cell.get_string() {
        CellValue::String(s.to_string())
    } else if let Some(i) = cell.get_int() {
        CellValue::Number(i as f64)
    } else if cell.is_datetime() {
        match cell.as_datetime() {
            Some(dt) if dt.time() == chrono::NaiveTime::MIN => {
                CellValue::String(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => CellValue::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::String(cell.to_string()),
        }
    } else if let Some(f) = cell.get_float() {
        CellValue::Number(f)
    } else {
        CellValue::String(cell.to_string())
    }
}

/// Text of a header cell.
fn cell_text(cell: &Data) -> String {
    match cell_value(cell) {
        CellValue::String(s) => s,
        other => other.as_text().into_owned(),
    }
}
