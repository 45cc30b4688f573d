//! Validation engine: classifies columns and dispatches cells to validators.

use tracing::{debug, info};

use crate::input::{Dataset, Row};

use super::category::{classify, Category};
use super::issue::ValidationIssue;
use super::validators::{
    AddressValidator, Cell, CellValidator, DateValidator, EmailValidator, IdValidator,
    NameValidator, NumericValidator, PhoneValidator, StatusValidator, TextQualityValidator,
    UrlValidator,
};

/// Runs the per-category validators over every non-empty cell.
pub struct ValidationEngine {
    validators: Vec<Box<dyn CellValidator>>,
}

impl ValidationEngine {
    /// Create an engine with the default validator for every category.
    pub fn new() -> Self {
        Self::with_date_validator(DateValidator::new())
    }

    /// Create an engine whose date checks use a fixed reference year.
    pub fn with_reference_year(reference_year: i32) -> Self {
        Self::with_date_validator(DateValidator::with_reference_year(reference_year))
    }

    fn with_date_validator(date: DateValidator) -> Self {
        Self {
            validators: vec![
                Box::new(NumericValidator),
                Box::new(date),
                Box::new(EmailValidator),
                Box::new(PhoneValidator),
                Box::new(UrlValidator),
                Box::new(IdValidator),
                Box::new(AddressValidator),
                Box::new(NameValidator),
                Box::new(StatusValidator),
                Box::new(TextQualityValidator),
            ],
        }
    }

    /// The validator registered for a category.
    pub fn validator_for(&self, category: Category) -> Option<&dyn CellValidator> {
        self.validators
            .iter()
            .find(|v| v.category() == category)
            .map(|v| v.as_ref())
    }

    /// Validate a dataset.
    pub fn validate(&self, dataset: &Dataset) -> Vec<ValidationIssue> {
        self.validate_rows(dataset.rows(), dataset.headers())
    }

    /// Validate rows against an ordered header list.
    ///
    /// Issues come out row by row, and within a row in header order. Row
    /// numbers are 1-based. Null, absent and whitespace-only cells are skipped.
    pub fn validate_rows(&self, rows: &[Row], headers: &[String]) -> Vec<ValidationIssue> {
        let columns: Vec<(&str, Option<&dyn CellValidator>)> = headers
            .iter()
            .map(|header| {
                let category = classify(header);
                debug!(column = %header, %category, "classified column");
                (header.as_str(), self.validator_for(category))
            })
            .collect();

        let mut issues = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            for (column, validator) in &columns {
                let Some(validator) = validator else {
                    continue;
                };
                let Some(value) = row.get(column) else {
                    continue;
                };
                if value.is_blank() {
                    continue;
                }

                let cell = Cell::new(index + 1, column, value);
                issues.extend(validator.validate(&cell));
            }
        }

        info!(
            rows = rows.len(),
            columns = headers.len(),
            issues = issues.len(),
            "validation complete"
        );

        issues
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a dataset with the default engine.
pub fn validate(dataset: &Dataset) -> Vec<ValidationIssue> {
    ValidationEngine::new().validate(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CellValue;
    use crate::validation::IssueKind;

    fn make_dataset(headers: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|cells| headers.iter().cloned().zip(cells).collect())
            .collect();
        Dataset::new(headers, rows).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_reference_year(2025)
    }

    #[test]
    fn test_invalid_email_under_email_address_column() {
        let dataset = make_dataset(&["Email_Address"], vec![vec!["invalid-email".into()]]);
        let issues = engine().validate(&dataset);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, IssueKind::InvalidEmail);
        assert_eq!(issues[0].row, 1);
        assert_eq!(issues[0].column, "Email_Address");
        assert_eq!(issues[0].value, CellValue::from("invalid-email"));
    }

    #[test]
    fn test_chinese_age() {
        let dataset = make_dataset(&["Age"], vec![vec!["三十五".into()]]);
        let issues = engine().validate(&dataset);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, IssueKind::ChineseNumber);
    }

    #[test]
    fn test_phone_length() {
        let dataset = make_dataset(
            &["phone"],
            vec![vec!["1234567890123456".into()], vec!["12345".into()]],
        );
        let issues = engine().validate(&dataset);

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.issue == IssueKind::InvalidPhoneLength));
        assert_eq!(issues[1].row, 2);
    }

    #[test]
    fn test_row_major_order() {
        let dataset = make_dataset(
            &["email", "website"],
            vec![
                vec!["bad".into(), "nowhere".into()],
                vec!["also bad".into(), "https://ok.example".into()],
            ],
        );
        let issues = engine().validate(&dataset);
        let order: Vec<(usize, &str, IssueKind)> = issues
            .iter()
            .map(|i| (i.row, i.column.as_str(), i.issue))
            .collect();

        assert_eq!(
            order,
            vec![
                (1, "email", IssueKind::InvalidEmail),
                (1, "website", IssueKind::MissingProtocol),
                (1, "website", IssueKind::InvalidUrlFormat),
                (2, "email", IssueKind::InvalidEmail),
            ]
        );
    }

    #[test]
    fn test_skips_blank_and_absent_cells() {
        let headers = vec!["email".to_string(), "notes".to_string()];
        let rows = vec![
            Row::from_pairs([("email", CellValue::Null)]),
            Row::from_pairs([("email", CellValue::from("   ")), ("notes", CellValue::from(""))]),
        ];
        let dataset = Dataset::new(headers, rows).unwrap();

        assert!(engine().validate(&dataset).is_empty());
    }

    #[test]
    fn test_zero_is_validated() {
        let dataset = make_dataset(&["phone"], vec![vec![CellValue::Number(0.0)]]);
        let issues = engine().validate(&dataset);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, IssueKind::InvalidPhoneLength);
    }

    #[test]
    fn test_cells_outside_headers_are_ignored() {
        let headers = vec!["id".to_string()];
        let rows = vec![Row::from_pairs([
            ("id", CellValue::from("A1")),
            ("email", CellValue::from("bad")),
        ])];
        let dataset = Dataset::new(headers, rows).unwrap();

        assert!(engine().validate(&dataset).is_empty());
    }

    #[test]
    fn test_clean_dataset() {
        let dataset = make_dataset(
            &["id", "age", "email"],
            vec![vec!["U001".into(), CellValue::Number(25.0), "a@b.com".into()]],
        );
        assert!(engine().validate(&dataset).is_empty());
    }

    #[test]
    fn test_every_category_has_a_validator() {
        let engine = engine();
        for category in crate::validation::PRECEDENCE {
            assert!(engine.validator_for(category).is_some());
        }
        assert!(engine.validator_for(Category::GenericText).is_some());
    }
}
