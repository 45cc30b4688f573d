//! Validation issue types.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::input::CellValue;

use super::category::Category;

/// Kind of problem found in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    ChineseNumber,
    CurrencySymbol,
    ThousandSeparator,
    UnrealisticAge,
    ChineseDateFormat,
    InvalidDate,
    UnrealisticDate,
    InvalidEmail,
    InvalidPhoneFormat,
    InvalidPhoneLength,
    InvalidMobileFormat,
    MissingProtocol,
    InvalidUrlFormat,
    IdContainsSpace,
    IncompleteAddress,
    InvalidZipcode,
    NameContainsNumbers,
    InvalidNameFormat,
    NameTooLong,
    SuspiciousStatusValue,
    StatusTooLong,
    ExtraWhitespace,
    MultipleSpaces,
    ControlCharacters,
    OnlySpecialChars,
}

impl IssueKind {
    /// The tag used in reports (`invalid_email`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::ChineseNumber => "chinese_number",
            IssueKind::CurrencySymbol => "currency_symbol",
            IssueKind::ThousandSeparator => "thousand_separator",
            IssueKind::UnrealisticAge => "unrealistic_age",
            IssueKind::ChineseDateFormat => "chinese_date_format",
            IssueKind::InvalidDate => "invalid_date",
            IssueKind::UnrealisticDate => "unrealistic_date",
            IssueKind::InvalidEmail => "invalid_email",
            IssueKind::InvalidPhoneFormat => "invalid_phone_format",
            IssueKind::InvalidPhoneLength => "invalid_phone_length",
            IssueKind::InvalidMobileFormat => "invalid_mobile_format",
            IssueKind::MissingProtocol => "missing_protocol",
            IssueKind::InvalidUrlFormat => "invalid_url_format",
            IssueKind::IdContainsSpace => "id_contains_space",
            IssueKind::IncompleteAddress => "incomplete_address",
            IssueKind::InvalidZipcode => "invalid_zipcode",
            IssueKind::NameContainsNumbers => "name_contains_numbers",
            IssueKind::InvalidNameFormat => "invalid_name_format",
            IssueKind::NameTooLong => "name_too_long",
            IssueKind::SuspiciousStatusValue => "suspicious_status_value",
            IssueKind::StatusTooLong => "status_too_long",
            IssueKind::ExtraWhitespace => "extra_whitespace",
            IssueKind::MultipleSpaces => "multiple_spaces",
            IssueKind::ControlCharacters => "control_characters",
            IssueKind::OnlySpecialChars => "only_special_chars",
        }
    }

    /// The column category whose validator emits this kind.
    pub fn category(&self) -> Category {
        match self {
            IssueKind::ChineseNumber
            | IssueKind::CurrencySymbol
            | IssueKind::ThousandSeparator
            | IssueKind::UnrealisticAge => Category::Numeric,
            IssueKind::ChineseDateFormat | IssueKind::InvalidDate | IssueKind::UnrealisticDate => {
                Category::Date
            }
            IssueKind::InvalidEmail => Category::Email,
            IssueKind::InvalidPhoneFormat
            | IssueKind::InvalidPhoneLength
            | IssueKind::InvalidMobileFormat => Category::Phone,
            IssueKind::MissingProtocol | IssueKind::InvalidUrlFormat => Category::Url,
            IssueKind::IdContainsSpace => Category::Id,
            IssueKind::IncompleteAddress | IssueKind::InvalidZipcode => Category::Address,
            IssueKind::NameContainsNumbers
            | IssueKind::InvalidNameFormat
            | IssueKind::NameTooLong => Category::Name,
            IssueKind::SuspiciousStatusValue | IssueKind::StatusTooLong => Category::Status,
            IssueKind::ExtraWhitespace
            | IssueKind::MultipleSpaces
            | IssueKind::ControlCharacters
            | IssueKind::OnlySpecialChars => Category::GenericText,
        }
    }

    /// Fixed suggestion text. Kinds whose message embeds the offending
    /// number get a generic form here; validators format the specific one.
    pub fn suggestion(&self) -> &'static str {
        match self {
            IssueKind::ChineseNumber => "Contains Chinese numerals; convert to Arabic digits",
            IssueKind::CurrencySymbol => "Contains a currency symbol; keep the plain number only",
            IssueKind::ThousandSeparator => {
                "Contains thousand separators; use a plain number format"
            }
            IssueKind::UnrealisticAge => "Age value looks unrealistic; please confirm it",
            IssueKind::ChineseDateFormat => {
                "Chinese date format; use the standard YYYY-MM-DD format"
            }
            IssueKind::InvalidDate => "Unrecognized date format; use YYYY-MM-DD",
            IssueKind::UnrealisticDate => "Date year looks unrealistic; please confirm it",
            IssueKind::InvalidEmail => "Invalid email format; expected user@domain.com",
            IssueKind::InvalidPhoneFormat => "Phone number contains non-digit characters",
            IssueKind::InvalidPhoneLength => {
                "Phone number length is unusual; expected 7-15 digits"
            }
            IssueKind::InvalidMobileFormat => {
                "11-digit number is not a valid Chinese mobile number"
            }
            IssueKind::MissingProtocol => "URL is missing a protocol prefix (http:// or https://)",
            IssueKind::InvalidUrlFormat => "URL format looks suspicious; please check it",
            IssueKind::IdContainsSpace => "ID contains spaces, which may break lookups",
            IssueKind::IncompleteAddress => "Address is very short and may be incomplete",
            IssueKind::InvalidZipcode => "Invalid postal code; Chinese postal codes are 6 digits",
            IssueKind::NameContainsNumbers => "Name contains digits; please confirm it",
            IssueKind::InvalidNameFormat => "Name format looks abnormal; please check it",
            IssueKind::NameTooLong => "Name is unusually long; please confirm it",
            IssueKind::SuspiciousStatusValue => {
                "Suspicious status value; use a consistent, standard value"
            }
            IssueKind::StatusTooLong => "Status value is too long to be a standard status",
            IssueKind::ExtraWhitespace => "Text has leading or trailing whitespace",
            IssueKind::MultipleSpaces => "Text contains consecutive whitespace",
            IssueKind::ControlCharacters => "Text contains line breaks or tabs",
            IssueKind::OnlySpecialChars => "Content consists only of special characters",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem found in one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 1-based row position in the validated dataset.
    pub row: usize,
    /// Column name.
    pub column: String,
    /// The cell value as it was found.
    pub value: CellValue,
    /// What is wrong.
    pub issue: IssueKind,
    /// How to fix it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create an issue carrying the kind's fixed suggestion.
    pub fn new(row: usize, column: impl Into<String>, value: CellValue, issue: IssueKind) -> Self {
        Self {
            row,
            column: column.into(),
            value,
            issue,
            suggestion: Some(issue.suggestion().to_string()),
        }
    }

    /// Replace the suggestion text.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Aggregate counts over a list of issues.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Total number of issues.
    pub total: usize,
    /// Issues per kind, in order of first appearance.
    pub by_kind: IndexMap<IssueKind, usize>,
    /// Issues per validator category, in order of first appearance.
    pub by_category: IndexMap<Category, usize>,
    /// Columns with at least one issue, in order of first appearance.
    pub columns: Vec<String>,
    /// Number of distinct rows with at least one issue.
    pub rows_affected: usize,
}

impl IssueSummary {
    /// Summarize a list of issues.
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut by_kind: IndexMap<IssueKind, usize> = IndexMap::new();
        let mut by_category: IndexMap<Category, usize> = IndexMap::new();
        let mut columns: IndexSet<&str> = IndexSet::new();
        let mut rows = BTreeSet::new();

        for issue in issues {
            *by_kind.entry(issue.issue).or_insert(0) += 1;
            *by_category.entry(issue.issue.category()).or_insert(0) += 1;
            columns.insert(issue.column.as_str());
            rows.insert(issue.row);
        }

        Self {
            total: issues.len(),
            by_kind,
            by_category,
            columns: columns.into_iter().map(String::from).collect(),
            rows_affected: rows.len(),
        }
    }

    /// Whether no issues were found.
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_serializes_with_tag() {
        let issue = ValidationIssue::new(3, "email", CellValue::from("x"), IssueKind::InvalidEmail);
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["row"], 3);
        assert_eq!(json["issue"], "invalid_email");
        assert_eq!(json["value"], "x");
        assert!(json["suggestion"].as_str().unwrap().contains("email"));
    }

    #[test]
    fn test_tag_matches_serde_name() {
        let kinds = [
            IssueKind::ChineseNumber,
            IssueKind::InvalidPhoneLength,
            IssueKind::OnlySpecialChars,
            IssueKind::InvalidZipcode,
        ];
        for kind in kinds {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn test_custom_suggestion() {
        let value = CellValue::Number(200.0);
        let issue = ValidationIssue::new(1, "age", value, IssueKind::UnrealisticAge)
            .with_suggestion("Age value 200 looks unrealistic; please confirm it");
        assert_eq!(
            issue.suggestion.as_deref(),
            Some("Age value 200 looks unrealistic; please confirm it")
        );
    }

    #[test]
    fn test_summary() {
        let issues = vec![
            ValidationIssue::new(1, "email", CellValue::from("a"), IssueKind::InvalidEmail),
            ValidationIssue::new(1, "url", CellValue::from("b"), IssueKind::MissingProtocol),
            ValidationIssue::new(2, "url", CellValue::from("c"), IssueKind::MissingProtocol),
        ];
        let summary = IssueSummary::from_issues(&issues);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_kind[&IssueKind::MissingProtocol], 2);
        assert_eq!(summary.by_kind.keys().next(), Some(&IssueKind::InvalidEmail));
        assert_eq!(summary.by_category[&Category::Url], 2);
        assert_eq!(summary.by_category.keys().next(), Some(&Category::Email));
        assert_eq!(summary.columns, vec!["email", "url"]);
        assert_eq!(summary.rows_affected, 2);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_every_kind_maps_back_to_its_validator() {
        assert_eq!(IssueKind::UnrealisticDate.category(), Category::Date);
        assert_eq!(IssueKind::InvalidMobileFormat.category(), Category::Phone);
        assert_eq!(IssueKind::ControlCharacters.category(), Category::GenericText);
    }
}
