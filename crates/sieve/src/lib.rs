//! Sieve: tabular data cleaning with heuristic cell validation.
//!
//! A dataset is read from a spreadsheet, delimited text or a JSON record
//! array, passed through a fixed sequence of cleaning stages, and then
//! checked cell by cell. Each column is classified from its name (email,
//! phone, date, ...) and every non-empty cell is checked by the validator
//! for that category. Problems are reported, never corrected.
//!
//! # Core Principles
//!
//! - **Fixed stage order**: empty rows, empty columns, whitespace, duplicates
//! - **First match wins**: column categories are tested in a fixed precedence
//! - **Detection only**: issues carry a suggestion; data values are not rewritten
//!
//! # Example
//!
//! ```no_run
//! use sieve::{CleaningConfig, Sieve};
//!
//! let sieve = Sieve::new();
//! let outcome = sieve.clean_file("people.csv", CleaningConfig::all()).unwrap();
//!
//! println!("Rows: {}", outcome.result.dataset.row_count());
//! println!("Issues: {}", outcome.summary.total);
//! ```

pub mod cleaning;
pub mod error;
pub mod input;
pub mod output;
pub mod profile;
pub mod validation;

mod sieve;

pub use crate::sieve::{CleanOutcome, InspectOutcome, Sieve, ValidationOutcome};
pub use cleaning::{CleaningConfig, CleaningOptions, CleaningPipeline, CleaningResult, Stage};
pub use error::{Result, SieveError};
pub use input::{read_dataset, CellValue, Dataset, Parser, ParserConfig, Row, SourceMetadata};
pub use output::{write_dataset, write_issues, OutputFormat};
pub use profile::DatasetProfile;
pub use validation::{
    classify, Category, IssueKind, IssueSummary, ValidationEngine, ValidationIssue,
};
