//! File-level entry point tying readers, pipeline and validation together.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cleaning::{CleaningConfig, CleaningPipeline, CleaningResult};
use crate::error::Result;
use crate::input::{read_dataset, SourceMetadata};
use crate::profile::DatasetProfile;
use crate::validation::{IssueSummary, ValidationEngine, ValidationIssue};

/// Result of cleaning a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOutcome {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Cleaned dataset, issues and stage report.
    pub result: CleaningResult,
    /// Issue counts.
    pub summary: IssueSummary,
}

/// Result of validating a file without cleaning it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub source: SourceMetadata,
    pub issues: Vec<ValidationIssue>,
    pub summary: IssueSummary,
}

/// Result of profiling a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutcome {
    pub source: SourceMetadata,
    pub profile: DatasetProfile,
}

/// Reads files and runs cleaning or validation over them.
pub struct Sieve {
    reference_year: Option<i32>,
}

impl Sieve {
    /// Create an instance whose date checks follow the local clock.
    pub fn new() -> Self {
        Self {
            reference_year: None,
        }
    }

    /// Pin the reference year used by date validation.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    fn engine(&self) -> ValidationEngine {
        match self.reference_year {
            Some(year) => ValidationEngine::with_reference_year(year),
            None => ValidationEngine::new(),
        }
    }

    /// Read a file and run the cleaning pipeline over it.
    pub fn clean_file(
        &self,
        path: impl AsRef<Path>,
        config: CleaningConfig,
    ) -> Result<CleanOutcome> {
        let (dataset, source) = read_dataset(path)?;
        info!(file = %source.file, format = %source.format, "loaded dataset");

        let result = CleaningPipeline::with_engine(config, self.engine()).run(dataset);
        let summary = result.summary();

        Ok(CleanOutcome {
            source,
            result,
            summary,
        })
    }

    /// Read a file and validate it as-is.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidationOutcome> {
        let (dataset, source) = read_dataset(path)?;
        info!(file = %source.file, format = %source.format, "loaded dataset");

        let issues = self.engine().validate(&dataset);
        let summary = IssueSummary::from_issues(&issues);

        Ok(ValidationOutcome {
            source,
            issues,
            summary,
        })
    }

    /// Read a file and profile it.
    pub fn inspect_file(
        &self,
        path: impl AsRef<Path>,
        preview_rows: usize,
    ) -> Result<InspectOutcome> {
        let (dataset, source) = read_dataset(path)?;
        let profile = DatasetProfile::from_dataset(&dataset, preview_rows);

        Ok(InspectOutcome { source, profile })
    }
}

impl Default for Sieve {
    fn default() -> Self {
        Self::new()
    }
}
