//! Cleaning pipeline: runs enabled stages in fixed order, then validation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::input::Dataset;
use crate::validation::{IssueSummary, ValidationEngine, ValidationIssue};

use super::config::CleaningConfig;
use super::stages::Stage;

/// Before/after shape of one executed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    /// Stage identifier.
    pub stage: Stage,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
}

impl StageReport {
    /// Rows dropped by the stage.
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }

    /// Columns dropped by the stage.
    pub fn columns_removed(&self) -> usize {
        self.columns_before - self.columns_after
    }
}

/// What a pipeline run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub input_columns: usize,
    pub output_rows: usize,
    pub output_columns: usize,
    /// Executed stages, in order.
    pub stages: Vec<StageReport>,
    /// Whether validation ran.
    pub validated: bool,
}

impl CleaningReport {
    fn new(dataset: &Dataset) -> Self {
        Self {
            input_rows: dataset.row_count(),
            input_columns: dataset.column_count(),
            output_rows: dataset.row_count(),
            output_columns: dataset.column_count(),
            stages: Vec::new(),
            validated: false,
        }
    }

    fn add_stage(&mut self, report: StageReport) {
        self.output_rows = report.rows_after;
        self.output_columns = report.columns_after;
        self.stages.push(report);
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningResult {
    /// The cleaned dataset.
    pub dataset: Dataset,
    /// Validation issues against the cleaned dataset, in row-major order.
    /// Empty when validation is disabled.
    pub issues: Vec<ValidationIssue>,
    /// Stage-by-stage report.
    pub report: CleaningReport,
}

impl CleaningResult {
    /// Summarize the issues.
    pub fn summary(&self) -> IssueSummary {
        IssueSummary::from_issues(&self.issues)
    }
}

/// Cleaning pipeline.
///
/// Stages always run in the order empty rows, empty columns, whitespace,
/// duplicates; each one only if its flag is set. Validation runs last so
/// issue row numbers match the cleaned output.
pub struct CleaningPipeline {
    config: CleaningConfig,
    engine: ValidationEngine,
}

impl CleaningPipeline {
    /// Create a pipeline with the default validation engine.
    pub fn new(config: CleaningConfig) -> Self {
        Self::with_engine(config, ValidationEngine::new())
    }

    /// Create a pipeline with a custom validation engine.
    pub fn with_engine(config: CleaningConfig, engine: ValidationEngine) -> Self {
        Self { config, engine }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Stages enabled by the configuration, in execution order.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }

    fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::RemoveEmptyRows => self.config.remove_empty_rows,
            Stage::RemoveEmptyColumns => self.config.remove_empty_columns,
            Stage::TrimWhitespace => self.config.trim_whitespace,
            Stage::RemoveDuplicates => self.config.remove_duplicates,
        }
    }

    /// Run the pipeline.
    pub fn run(&self, dataset: Dataset) -> CleaningResult {
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "starting cleaning pipeline"
        );

        let mut report = CleaningReport::new(&dataset);
        let mut dataset = dataset;

        for stage in self.enabled_stages() {
            let rows_before = dataset.row_count();
            let columns_before = dataset.column_count();

            dataset = stage.apply(dataset);

            let stage_report = StageReport {
                stage,
                rows_before,
                rows_after: dataset.row_count(),
                columns_before,
                columns_after: dataset.column_count(),
            };
            info!(
                stage = %stage,
                rows_removed = stage_report.rows_removed(),
                columns_removed = stage_report.columns_removed(),
                "stage complete"
            );
            report.add_stage(stage_report);
        }

        let issues = if self.config.check_validate {
            report.validated = true;
            self.engine.validate(&dataset)
        } else {
            Vec::new()
        };

        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            issues = issues.len(),
            "cleaning pipeline complete"
        );

        CleaningResult {
            dataset,
            issues,
            report,
        }
    }
}

/// Clean a dataset with the default pipeline.
pub fn clean(dataset: Dataset, config: CleaningConfig) -> CleaningResult {
    CleaningPipeline::new(config).run(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CellValue;
    use crate::validation::IssueKind;

    fn dataset(headers: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|cells| headers.iter().cloned().zip(cells).collect())
            .collect();
        Dataset::new(headers, rows).unwrap()
    }

    fn pipeline(config: CleaningConfig) -> CleaningPipeline {
        CleaningPipeline::with_engine(config, ValidationEngine::with_reference_year(2025))
    }

    #[test]
    fn test_duplicate_row_collapses_with_no_issues() {
        let row = || vec!["U001".into(), CellValue::Number(25.0), "a@b.com".into()];
        let data = dataset(&["id", "age", "email"], vec![row(), row()]);

        let result = pipeline(CleaningConfig::all()).run(data);

        assert_eq!(result.dataset.row_count(), 1);
        assert_eq!(result.dataset.column_count(), 3);
        assert!(result.issues.is_empty());
        assert!(result.report.validated);
    }

    #[test]
    fn test_trim_before_dedup() {
        let data = dataset(
            &["name"],
            vec![vec!["Alice".into()], vec!["  Alice ".into()]],
        );
        let result = pipeline(CleaningConfig::all()).run(data);

        assert_eq!(result.dataset.row_count(), 1);
    }

    #[test]
    fn test_whitespace_only_row_removed_before_trim() {
        let data = dataset(
            &["a", "b"],
            vec![vec!["x".into(), "y".into()], vec!["  ".into(), "\t".into()]],
        );
        let config = CleaningConfig {
            remove_empty_rows: true,
            ..CleaningConfig::none()
        };
        let result = pipeline(config).run(data);

        assert_eq!(result.dataset.row_count(), 1);
        assert_eq!(result.report.stages.len(), 1);
        assert_eq!(result.report.stages[0].rows_removed(), 1);
    }

    #[test]
    fn test_stage_order_ignores_flag_order() {
        let pipeline = pipeline(CleaningConfig {
            remove_duplicates: true,
            remove_empty_rows: false,
            remove_empty_columns: true,
            trim_whitespace: true,
            check_validate: false,
        });

        assert_eq!(
            pipeline.enabled_stages(),
            vec![
                Stage::RemoveEmptyColumns,
                Stage::TrimWhitespace,
                Stage::RemoveDuplicates
            ]
        );
    }

    #[test]
    fn test_issue_rows_refer_to_cleaned_dataset() {
        let data = dataset(
            &["email"],
            vec![
                vec!["".into()],
                vec!["ok@example.com".into()],
                vec!["broken".into()],
            ],
        );
        let result = pipeline(CleaningConfig::all()).run(data);

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].issue, IssueKind::InvalidEmail);
        assert_eq!(result.issues[0].row, 2);
    }

    #[test]
    fn test_validation_disabled() {
        let data = dataset(&["email"], vec![vec!["broken".into()]]);
        let result = pipeline(CleaningConfig::none()).run(data.clone());

        assert!(result.issues.is_empty());
        assert!(!result.report.validated);
        assert!(result.report.stages.is_empty());
        assert_eq!(result.dataset, data);
    }

    #[test]
    fn test_report_totals() {
        let data = dataset(
            &["a", "empty"],
            vec![
                vec!["1".into(), "".into()],
                vec!["1".into(), "".into()],
                vec!["".into(), "".into()],
            ],
        );
        let result = pipeline(CleaningConfig::all()).run(data);

        assert_eq!(result.report.input_rows, 3);
        assert_eq!(result.report.input_columns, 2);
        assert_eq!(result.report.output_rows, 1);
        assert_eq!(result.report.output_columns, 1);
        assert_eq!(result.report.stages.len(), 4);
    }
}
