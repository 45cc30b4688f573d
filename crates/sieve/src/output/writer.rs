//! Dataset and issue writers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::error::{Result, SieveError};
use crate::input::{CellValue, Dataset};
use crate::validation::ValidationIssue;

use super::OutputFormat;

/// Write a dataset to `path` in the given format.
///
/// Delimited output writes the header row, then each row in header order;
/// null and absent cells become empty fields. JSON output is a pretty
/// array of objects holding only the declared columns. Workbook output has
/// one `Cleaned Data` sheet laid out like delimited output, with numbers
/// stored as numbers.
pub fn write_dataset(
    dataset: &Dataset,
    format: OutputFormat,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let file = create_file(path)?;

    match format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            write_delimited(dataset, format.delimiter(), file, path)?
        }
        OutputFormat::Json => write_json(dataset, file, path)?,
        OutputFormat::Xlsx => write_workbook(dataset, file, path)?,
    }

    debug!(
        path = %path.display(),
        %format,
        rows = dataset.row_count(),
        "wrote dataset"
    );
    Ok(())
}

/// Write validation issues to `path` as a pretty JSON array.
pub fn write_issues(issues: &[ValidationIssue], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(create_file(path)?);
    serde_json::to_writer_pretty(&mut writer, issues)?;
    writer.flush().map_err(|e| SieveError::io(path, e))?;

    debug!(path = %path.display(), issues = issues.len(), "wrote issues");
    Ok(())
}

/// Path of the cleaned output for `input`: `<dir>/<stem>_cleaned.<ext>`.
pub fn cleaned_path(input: &Path, dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "data".into());
    dir.join(format!("{}_cleaned.{}", stem, format.extension()))
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SieveError::io(parent, e))?;
        }
    }
    File::create(path).map_err(|e| SieveError::io(path, e))
}

fn write_delimited(dataset: &Dataset, delimiter: u8, file: File, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(BufWriter::new(file));

    writer.write_record(dataset.headers())?;
    for row in dataset.rows() {
        writer.write_record(
            dataset
                .headers()
                .iter()
                .map(|h| row.get(h).map(|v| v.as_text().into_owned()).unwrap_or_default()),
        )?;
    }
    writer.flush().map_err(|e| SieveError::io(path, e))
}

fn write_json(dataset: &Dataset, file: File, path: &Path) -> Result<()> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = dataset
        .rows()
        .iter()
        .map(|row| {
            dataset
                .headers()
                .iter()
                .filter_map(|h| row.get(h).map(|value| (h.clone(), cell_json(value))))
                .collect()
        })
        .collect();

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.flush().map_err(|e| SieveError::io(path, e))
}

/// Name of the worksheet holding cleaned data.
const SHEET_NAME: &str = "Cleaned Data";

/// Minimum column width, in characters.
const MIN_COLUMN_WIDTH: usize = 15;

fn write_workbook(dataset: &Dataset, mut file: File, path: &Path) -> Result<()> {
    let headers = dataset.headers();
    if headers.len() > usize::from(u16::MAX) || dataset.row_count() >= u32::MAX as usize {
        return Err(SieveError::UnsupportedFormat(format!(
            "{} x {} is too large for a worksheet",
            dataset.row_count(),
            headers.len()
        )));
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, header)?;
        sheet.set_column_width(col, header.chars().count().max(MIN_COLUMN_WIDTH) as f64)?;
    }

    for (index, row) in dataset.rows().iter().enumerate() {
        let line = index as u32 + 1;
        for (col, header) in headers.iter().enumerate() {
            let col = col as u16;
            match row.get(header) {
                Some(CellValue::Number(n)) if n.is_finite() => {
                    sheet.write_number(line, col, *n)?;
                }
                Some(CellValue::String(s)) if !s.is_empty() => {
                    sheet.write_string(line, col, s)?;
                }
                _ => {}
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    file.write_all(&buffer).map_err(|e| SieveError::io(path, e))
}

fn cell_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Null => serde_json::Value::Null,
        CellValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        CellValue::String(s) => serde_json::Value::String(s.clone()),
    }
}
