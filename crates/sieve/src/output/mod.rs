//! Writers for cleaned datasets and issue lists.

mod writer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SieveError;

pub use writer::{cleaned_path, write_dataset, write_issues};

/// Output file format for cleaned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array of records.
    Json,
    /// Excel workbook with a single `Cleaned Data` sheet.
    Xlsx,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Field delimiter for delimited formats.
    pub(crate) fn delimiter(&self) -> u8 {
        match self {
            OutputFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" | "tab" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "xls" | "xlsm" | "ods" => Err(SieveError::UnsupportedFormat(format!(
                "writing .{} is not supported; use xlsx, csv, tsv or json",
                s
            ))),
            other => Err(SieveError::UnsupportedFormat(format!("output format '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Excel".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert!(matches!(
            "ods".parse::<OutputFormat>(),
            Err(SieveError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Tsv.extension(), "tsv");
        assert_eq!(OutputFormat::Xlsx.extension(), "xlsx");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }
}
