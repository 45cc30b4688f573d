//! Error types for the Sieve library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sieve operations.
///
/// The cleaning and validation core never fails on a well-formed
/// [`Dataset`](crate::Dataset); these variants come from configuration
/// resolution and from the reader/writer layer around it.
#[derive(Debug, Error)]
pub enum SieveError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error opening or reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Error building a workbook for spreadsheet output.
    #[error("Workbook write error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to clean.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid or incomplete cleaning configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The same column name appears more than once in a header row.
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),
}

impl SieveError {
    /// Wrap an IO error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SieveError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
