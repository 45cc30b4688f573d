//! Property-based tests for the cleaning pipeline and classifier.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p sieve --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p sieve --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use sieve::cleaning::{remove_duplicates, trim_whitespace};
use sieve::validation::PRECEDENCE;
use sieve::{
    classify, Category, CellValue, CleaningConfig, CleaningPipeline, Dataset, Row,
    ValidationEngine,
};

// =============================================================================
// Test Strategies
// =============================================================================

const HEADERS: [&str; 4] = ["id", "email", "age", "notes"];

/// Cell values biased toward blanks, padding and number/string lookalikes.
fn cell_value() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        Just(CellValue::from("")),
        Just(CellValue::from("  ")),
        (0i64..5).prop_map(|n| CellValue::Number(n as f64)),
        (0i64..5).prop_map(|n| CellValue::String(n.to_string())),
        "[ ]{0,2}[a-c@.]{0,4}[ ]{0,2}".prop_map(CellValue::String),
    ]
}

/// Rows over a subset of the fixed headers.
fn row() -> impl Strategy<Value = Row> {
    proptest::collection::vec(proptest::option::of(cell_value()), HEADERS.len()).prop_map(|cells| {
        HEADERS
            .iter()
            .zip(cells)
            .filter_map(|(h, cell)| cell.map(|v| (h.to_string(), v)))
            .collect()
    })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    proptest::collection::vec(row(), 0..12).prop_map(|rows| {
        Dataset::new(HEADERS.iter().map(|h| h.to_string()).collect(), rows).unwrap()
    })
}

fn config() -> impl Strategy<Value = CleaningConfig> {
    any::<[bool; 5]>().prop_map(|[dedup, empty_rows, empty_columns, trim, validate]| {
        CleaningConfig {
            remove_duplicates: dedup,
            remove_empty_rows: empty_rows,
            remove_empty_columns: empty_columns,
            trim_whitespace: trim,
            check_validate: validate,
        }
    })
}

fn pipeline(config: CleaningConfig) -> CleaningPipeline {
    CleaningPipeline::with_engine(config, ValidationEngine::with_reference_year(2025))
}

// =============================================================================
// Pipeline properties
// =============================================================================

proptest! {
    #[test]
    fn pipeline_is_idempotent(data in dataset(), config in config()) {
        let first = pipeline(config).run(data);
        let second = pipeline(config).run(first.dataset.clone());

        prop_assert_eq!(&second.dataset, &first.dataset);
        prop_assert_eq!(second.issues, first.issues);
    }

    #[test]
    fn pipeline_never_grows(data in dataset(), config in config()) {
        let rows = data.row_count();
        let columns = data.column_count();
        let result = pipeline(config).run(data);

        prop_assert!(result.dataset.row_count() <= rows);
        prop_assert!(result.dataset.column_count() <= columns);
    }

    #[test]
    fn headers_stay_unique(data in dataset(), config in config()) {
        let result = pipeline(config).run(data);
        let unique: HashSet<&String> = result.dataset.headers().iter().collect();
        prop_assert_eq!(unique.len(), result.dataset.column_count());
    }

    #[test]
    fn no_duplicates_survive(data in dataset()) {
        let original = data.clone();
        let cleaned = remove_duplicates(data);

        let mut seen = HashSet::new();
        for row in cleaned.rows() {
            prop_assert!(seen.insert(row.key()));
        }

        // Survivors are the first occurrences, in original order.
        let mut firsts = Vec::new();
        let mut keys = HashSet::new();
        for row in original.rows() {
            if keys.insert(row.key()) {
                firsts.push(row.clone());
            }
        }
        prop_assert_eq!(cleaned.rows(), firsts.as_slice());
    }

    #[test]
    fn trimmed_strings_are_fixed_points(data in dataset()) {
        let cleaned = trim_whitespace(data);
        for row in cleaned.rows() {
            for (_, value) in row.iter() {
                if let CellValue::String(s) = value {
                    prop_assert_eq!(s.as_str(), s.trim());
                }
            }
        }
    }

    #[test]
    fn issue_rows_are_in_range(data in dataset()) {
        let result = pipeline(CleaningConfig::all()).run(data);
        let rows = result.dataset.row_count();
        let mut last = 0;
        for issue in &result.issues {
            prop_assert!(issue.row >= 1 && issue.row <= rows);
            prop_assert!(issue.row >= last);
            last = issue.row;
        }
    }
}

// =============================================================================
// Classifier properties
// =============================================================================

proptest! {
    #[test]
    fn classify_never_panics(name in "\\PC{0,40}") {
        let _ = classify(&name);
    }

    #[test]
    fn classify_is_case_insensitive(name in "[a-zA-Z_]{0,20}") {
        prop_assert_eq!(classify(&name), classify(&name.to_uppercase()));
    }

    #[test]
    fn classify_returns_first_matching_category(name in "[a-z_]{0,20}") {
        let expected = PRECEDENCE
            .into_iter()
            .find(|c| c.matches(&name))
            .unwrap_or(Category::GenericText);
        prop_assert_eq!(classify(&name), expected);
    }

    #[test]
    fn email_prefix_beats_later_categories(suffix in "(address|_id|_name|_status|_city)") {
        let name = format!("Email{}", suffix);
        prop_assert_eq!(classify(&name), Category::Email);
    }
}
