//! Dataset model and the readers that produce it.

mod dataset;
mod parser;
mod records;
mod source;
mod spreadsheet;

use std::path::Path;

use tracing::debug;

use crate::error::{Result, SieveError};

pub use dataset::{CellKey, CellValue, Dataset, Row, RowKey};
pub(crate) use dataset::format_number;
pub use parser::{Parser, ParserConfig};
pub use records::parse_records;
pub use source::{content_hash, SourceMetadata};
pub use spreadsheet::read_workbook;

/// Read a file into a dataset, choosing the reader by extension.
///
/// Supported: `.csv`, `.tsv`, `.txt` (delimited text), `.json` (array of
/// records), `.xlsx`, `.xls`, `.xlsm`, `.ods` (first worksheet).
pub fn read_dataset(path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let contents = std::fs::read(path).map_err(|e| SieveError::io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "read source file");

    let (dataset, format) = match ext.as_str() {
        "csv" | "tsv" | "txt" => {
            let (dataset, delimiter) = Parser::new().parse_bytes(&contents)?;
            (dataset, parser::delimiter_format(delimiter).to_string())
        }
        "json" => (parse_records(&contents)?, "json".to_string()),
        "xlsx" | "xls" | "xlsm" | "ods" => (read_workbook(path)?, ext.clone()),
        "" => {
            return Err(SieveError::UnsupportedFormat(format!(
                "'{}' has no file extension",
                path.display()
            )));
        }
        other => return Err(SieveError::UnsupportedFormat(format!(".{}", other))),
    };

    let metadata = SourceMetadata::new(
        path.to_path_buf(),
        &contents,
        format,
        dataset.row_count(),
        dataset.column_count(),
    );

    Ok((dataset, metadata))
}
