//! Per-category cell validators.
//!
//! Each validator inspects one non-empty cell of a column whose name was
//! classified into its [`Category`], and runs every check that applies to
//! it. Checks are independent unless noted: a value can fail several.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::{format_number, CellValue};

use super::category::{implies_age, implies_postal_code, Category};
use super::issue::{IssueKind, ValidationIssue};

// =============================================================================
// STATIC PATTERNS
// =============================================================================

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static ZIPCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("valid zipcode regex"));

static YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("valid year-month regex"));

/// Chinese numeral characters.
const CJK_NUMERALS: &[char] = &[
    '零', '一', '二', '两', '三', '四', '五', '六', '七', '八', '九', '十', '百', '千', '万', '亿',
];

const CURRENCY_SYMBOLS: &[char] = &['¥', '$', '€', '£', '￥'];

/// Characters stripped from phone numbers before checking digits.
const PHONE_SEPARATORS: &[char] = &['-', '+', '(', ')'];

/// Status values that usually stand in for missing data.
const SUSPICIOUS_STATUS_VALUES: &[&str] = &[
    "null", "undefined", "none", "n/a", "na", "unknown", "未知", "空", "无",
];

/// Date-time layouts accepted by the date validator, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts accepted by the date validator, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const MAX_AGE: f64 = 150.0;
const MIN_YEAR: i32 = 1900;
/// How far past the reference year a date may lie.
const FUTURE_YEAR_MARGIN: i32 = 10;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;
const MOBILE_DIGITS: usize = 11;
const MIN_ADDRESS_LEN: usize = 5;
const MAX_NAME_LEN: usize = 50;
const MAX_STATUS_LEN: usize = 20;

// =============================================================================
// CELL + TRAIT
// =============================================================================

/// A cell presented to a validator.
#[derive(Debug, Clone)]
pub struct Cell<'a> {
    /// 1-based row position.
    pub row: usize,
    /// Column name.
    pub column: &'a str,
    /// Original value.
    pub value: &'a CellValue,
    text: Cow<'a, str>,
}

impl<'a> Cell<'a> {
    /// Wrap a cell value.
    pub fn new(row: usize, column: &'a str, value: &'a CellValue) -> Self {
        Self {
            row,
            column,
            value,
            text: value.as_text(),
        }
    }

    /// Trimmed string form of the value.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Issue with the kind's fixed suggestion.
    fn issue(&self, kind: IssueKind) -> ValidationIssue {
        ValidationIssue::new(self.row, self.column, self.value.clone(), kind)
    }
}

/// Validator for the cells of one column category.
pub trait CellValidator: Send + Sync {
    /// Category this validator handles.
    fn category(&self) -> Category;

    /// Check one non-empty cell.
    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue>;
}

// =============================================================================
// NUMERIC
// =============================================================================

/// Checks amounts, counts and ages for formatting that breaks numeric parsing.
pub struct NumericValidator;

impl CellValidator for NumericValidator {
    fn category(&self) -> Category {
        Category::Numeric
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let text = cell.text();
        let mut issues = Vec::new();

        if text.contains(CJK_NUMERALS) {
            issues.push(cell.issue(IssueKind::ChineseNumber));
        }

        if text.contains(CURRENCY_SYMBOLS) {
            issues.push(cell.issue(IssueKind::CurrencySymbol));
        }

        if text.contains(',') && parse_number(&text.replace(',', "")).is_some() {
            issues.push(cell.issue(IssueKind::ThousandSeparator));
        }

        if implies_age(cell.column) {
            let digits: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if let Some(age) = leading_float(&digits) {
                if !(0.0..=MAX_AGE).contains(&age) {
                    issues.push(cell.issue(IssueKind::UnrealisticAge).with_suggestion(format!(
                        "Age value {} looks unrealistic; please confirm it",
                        format_number(age)
                    )));
                }
            }
        }

        issues
    }
}

/// Parse a plain decimal number, allowing sign and exponent.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty()
        || !s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse the longest leading `digits[.digits]` prefix of a string made of
/// digits and dots.
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

// =============================================================================
// DATE
// =============================================================================

/// Checks that dates parse and fall in a plausible year range.
pub struct DateValidator {
    reference_year: i32,
}

impl DateValidator {
    /// Validator whose year range ends ten years after the current year.
    pub fn new() -> Self {
        Self::with_reference_year(Local::now().year())
    }

    /// Validator with a fixed reference year.
    pub fn with_reference_year(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Reference year used for the upper bound.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CellValidator for DateValidator {
    fn category(&self) -> Category {
        Category::Date
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let text = cell.text();

        if text.contains('年') && text.contains('月') {
            return vec![cell.issue(IssueKind::ChineseDateFormat)];
        }

        let Some(date) = parse_date(text) else {
            return vec![cell.issue(IssueKind::InvalidDate)];
        };

        let year = date.year();
        if year < MIN_YEAR || year > self.reference_year + FUTURE_YEAR_MARGIN {
            return vec![cell.issue(IssueKind::UnrealisticDate).with_suggestion(format!(
                "Date year {} looks unrealistic; please confirm it",
                year
            ))];
        }

        Vec::new()
    }
}

/// Parse a date using the fixed accepted grammar:
///
/// - RFC 3339 timestamps (`2024-01-15T08:30:00Z`, with offset)
/// - `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`, optionally followed by a
///   `HH:MM[:SS[.fff]]` time (space or `T` separated for dashes)
/// - US `MM/DD/YYYY`
/// - month names: `January 15, 2024`, `Jan 15 2024`, `15 Jan 2024`
/// - reduced precision `YYYY` and `YYYY-MM`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    if YEAR_ONLY.is_match(text) {
        return text
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }

    if let Some(caps) = YEAR_MONTH.captures(text) {
        let year = caps[1].parse::<i32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    None
}

// =============================================================================
// EMAIL / PHONE / URL / ID
// =============================================================================

/// Checks email address shape.
pub struct EmailValidator;

impl CellValidator for EmailValidator {
    fn category(&self) -> Category {
        Category::Email
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        if EMAIL_PATTERN.is_match(cell.text()) {
            Vec::new()
        } else {
            vec![cell.issue(IssueKind::InvalidEmail)]
        }
    }
}

/// Checks phone numbers after removing common separators.
pub struct PhoneValidator;

impl CellValidator for PhoneValidator {
    fn category(&self) -> Category {
        Category::Phone
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let digits: String = cell
            .text()
            .chars()
            .filter(|c| !c.is_whitespace() && !PHONE_SEPARATORS.contains(c))
            .collect();

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return vec![cell.issue(IssueKind::InvalidPhoneFormat)];
        }

        let mut issues = Vec::new();
        let len = digits.len();

        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&len) {
            issues.push(cell.issue(IssueKind::InvalidPhoneLength).with_suggestion(format!(
                "Phone number has {} digits; expected {}-{}",
                len, MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
            )));
        }

        if len == MOBILE_DIGITS && !digits.starts_with('1') {
            issues.push(cell.issue(IssueKind::InvalidMobileFormat));
        }

        issues
    }
}

/// Checks web addresses for a protocol and a plausible host.
pub struct UrlValidator;

impl CellValidator for UrlValidator {
    fn category(&self) -> Category {
        Category::Url
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let text = cell.text();
        let mut issues = Vec::new();

        if !text.starts_with("http://") && !text.starts_with("https://") {
            issues.push(cell.issue(IssueKind::MissingProtocol));
        }

        if !text.contains('.') || text.contains(' ') {
            issues.push(cell.issue(IssueKind::InvalidUrlFormat));
        }

        issues
    }
}

/// Checks identifiers for embedded spaces.
pub struct IdValidator;

impl CellValidator for IdValidator {
    fn category(&self) -> Category {
        Category::Id
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        if cell.text().contains(' ') {
            vec![cell.issue(IssueKind::IdContainsSpace)]
        } else {
            Vec::new()
        }
    }
}

// =============================================================================
// ADDRESS / NAME / STATUS
// =============================================================================

/// Checks addresses for completeness and postal codes for shape.
pub struct AddressValidator;

impl CellValidator for AddressValidator {
    fn category(&self) -> Category {
        Category::Address
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let text = cell.text();
        let mut issues = Vec::new();

        if text.chars().count() < MIN_ADDRESS_LEN {
            issues.push(cell.issue(IssueKind::IncompleteAddress));
        }

        if implies_postal_code(cell.column) && !ZIPCODE_PATTERN.is_match(text) {
            issues.push(cell.issue(IssueKind::InvalidZipcode));
        }

        issues
    }
}

/// Checks person and object names.
pub struct NameValidator;

impl NameValidator {
    fn is_name_char(c: char) -> bool {
        c.is_ascii_alphabetic() || is_cjk_ideograph(c) || c.is_whitespace() || c == '-' || c == '.'
    }
}

impl CellValidator for NameValidator {
    fn category(&self) -> Category {
        Category::Name
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let text = cell.text();
        let mut issues = Vec::new();

        if text.chars().any(|c| c.is_ascii_digit()) {
            issues.push(cell.issue(IssueKind::NameContainsNumbers));
        }

        if text.chars().all(|c| !Self::is_name_char(c)) {
            issues.push(cell.issue(IssueKind::InvalidNameFormat));
        }

        if text.chars().count() > MAX_NAME_LEN {
            issues.push(cell.issue(IssueKind::NameTooLong));
        }

        issues
    }
}

/// Checks status values for placeholders and free text.
pub struct StatusValidator;

impl CellValidator for StatusValidator {
    fn category(&self) -> Category {
        Category::Status
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let text = cell.text();
        let mut issues = Vec::new();

        if SUSPICIOUS_STATUS_VALUES.contains(&text.to_lowercase().as_str()) {
            issues.push(cell.issue(IssueKind::SuspiciousStatusValue));
        }

        if text.chars().count() > MAX_STATUS_LEN {
            issues.push(cell.issue(IssueKind::StatusTooLong));
        }

        issues
    }
}

// =============================================================================
// GENERIC TEXT
// =============================================================================

/// Text hygiene checks for columns without a recognized category.
///
/// Works on the raw string so that untrimmed input is visible; numbers and
/// nulls are skipped.
pub struct TextQualityValidator;

impl CellValidator for TextQualityValidator {
    fn category(&self) -> Category {
        Category::GenericText
    }

    fn validate(&self, cell: &Cell<'_>) -> Vec<ValidationIssue> {
        let Some(raw) = cell.value.as_str() else {
            return Vec::new();
        };
        let mut issues = Vec::new();

        if raw != raw.trim() {
            issues.push(cell.issue(IssueKind::ExtraWhitespace));
        }

        let mut prev_ws = false;
        let has_run = raw.chars().any(|c| {
            let ws = c.is_whitespace();
            let run = ws && prev_ws;
            prev_ws = ws;
            run
        });
        if has_run {
            issues.push(cell.issue(IssueKind::MultipleSpaces));
        }

        if raw.contains(['\r', '\n', '\t']) {
            issues.push(cell.issue(IssueKind::ControlCharacters));
        }

        if raw.chars().count() > 1
            && raw
                .chars()
                .all(|c| !(c.is_ascii_alphanumeric() || is_cjk_ideograph(c)))
        {
            issues.push(cell.issue(IssueKind::OnlySpecialChars));
        }

        issues
    }
}

/// CJK unified ideographs in the basic block (U+4E00..=U+9FA5).
fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}
