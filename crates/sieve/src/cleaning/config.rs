//! Cleaning configuration: the five stage flags.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// Fully specified cleaning flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningConfig {
    /// Drop rows structurally equal to an earlier row.
    pub remove_duplicates: bool,
    /// Drop rows where every column is blank.
    pub remove_empty_rows: bool,
    /// Drop columns blank in every row.
    pub remove_empty_columns: bool,
    /// Trim surrounding whitespace from string cells.
    pub trim_whitespace: bool,
    /// Run validation on the cleaned dataset.
    pub check_validate: bool,
}

impl CleaningConfig {
    /// Every stage and validation enabled.
    pub fn all() -> Self {
        Self {
            remove_duplicates: true,
            remove_empty_rows: true,
            remove_empty_columns: true,
            trim_whitespace: true,
            check_validate: true,
        }
    }

    /// Every stage and validation disabled.
    pub fn none() -> Self {
        Self {
            remove_duplicates: false,
            remove_empty_rows: false,
            remove_empty_columns: false,
            trim_whitespace: false,
            check_validate: false,
        }
    }
}

/// Partially specified cleaning flags, as read from a file or command line.
///
/// Keys are camelCase (`removeDuplicates`); snake_case is accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CleaningOptions {
    #[serde(alias = "remove_duplicates", skip_serializing_if = "Option::is_none")]
    pub remove_duplicates: Option<bool>,
    #[serde(alias = "remove_empty_rows", skip_serializing_if = "Option::is_none")]
    pub remove_empty_rows: Option<bool>,
    #[serde(alias = "remove_empty_columns", skip_serializing_if = "Option::is_none")]
    pub remove_empty_columns: Option<bool>,
    #[serde(alias = "trim_whitespace", skip_serializing_if = "Option::is_none")]
    pub trim_whitespace: Option<bool>,
    #[serde(alias = "check_validate", skip_serializing_if = "Option::is_none")]
    pub check_validate: Option<bool>,
}

impl CleaningOptions {
    /// Parse options from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SieveError::Config(format!("Failed to parse cleaning flags: {}", e)))
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SieveError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SieveError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Overlay `other` on top of `self`; flags set in `other` win.
    pub fn merge(self, other: CleaningOptions) -> Self {
        Self {
            remove_duplicates: other.remove_duplicates.or(self.remove_duplicates),
            remove_empty_rows: other.remove_empty_rows.or(self.remove_empty_rows),
            remove_empty_columns: other.remove_empty_columns.or(self.remove_empty_columns),
            trim_whitespace: other.trim_whitespace.or(self.trim_whitespace),
            check_validate: other.check_validate.or(self.check_validate),
        }
    }

    /// Set every unspecified flag to `value`.
    pub fn fill(self, value: bool) -> Self {
        Self {
            remove_duplicates: Some(self.remove_duplicates.unwrap_or(value)),
            remove_empty_rows: Some(self.remove_empty_rows.unwrap_or(value)),
            remove_empty_columns: Some(self.remove_empty_columns.unwrap_or(value)),
            trim_whitespace: Some(self.trim_whitespace.unwrap_or(value)),
            check_validate: Some(self.check_validate.unwrap_or(value)),
        }
    }

    /// Resolve into a complete configuration. Missing flags are an error;
    /// nothing is defaulted.
    pub fn resolve(self) -> Result<CleaningConfig> {
        fn require(flag: Option<bool>, name: &str) -> Result<bool> {
            flag.ok_or_else(|| SieveError::Config(format!("missing required flag '{}'", name)))
        }

        Ok(CleaningConfig {
            remove_duplicates: require(self.remove_duplicates, "removeDuplicates")?,
            remove_empty_rows: require(self.remove_empty_rows, "removeEmptyRows")?,
            remove_empty_columns: require(self.remove_empty_columns, "removeEmptyColumns")?,
            trim_whitespace: require(self.trim_whitespace, "trimWhitespace")?,
            check_validate: require(self.check_validate, "checkValidate")?,
        })
    }
}

impl From<CleaningConfig> for CleaningOptions {
    fn from(config: CleaningConfig) -> Self {
        Self {
            remove_duplicates: Some(config.remove_duplicates),
            remove_empty_rows: Some(config.remove_empty_rows),
            remove_empty_columns: Some(config.remove_empty_columns),
            trim_whitespace: Some(config.trim_whitespace),
            check_validate: Some(config.check_validate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_and_snake_case() {
        let options = CleaningOptions::from_json_str(
            r#"{"removeDuplicates": true, "trim_whitespace": false}"#,
        )
        .unwrap();

        assert_eq!(options.remove_duplicates, Some(true));
        assert_eq!(options.trim_whitespace, Some(false));
        assert_eq!(options.check_validate, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            CleaningOptions::from_json_str(r#"{"sortRows": true}"#),
            Err(SieveError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            CleaningOptions::from_json_str(r#"{"removeDuplicates": "yes"}"#),
            Err(SieveError::Config(_))
        ));
        assert!(matches!(CleaningOptions::from_json_str("{"), Err(SieveError::Config(_))));
    }

    #[test]
    fn test_resolve_names_missing_flag() {
        let options = CleaningOptions {
            remove_duplicates: Some(true),
            ..Default::default()
        };
        let err = options.resolve().unwrap_err();

        assert!(matches!(err, SieveError::Config(_)));
        assert!(err.to_string().contains("removeEmptyRows"));
    }

    #[test]
    fn test_merge_later_wins() {
        let file = CleaningOptions {
            remove_duplicates: Some(true),
            check_validate: Some(true),
            ..Default::default()
        };
        let cli = CleaningOptions {
            check_validate: Some(false),
            ..Default::default()
        };
        let merged = file.merge(cli);

        assert_eq!(merged.remove_duplicates, Some(true));
        assert_eq!(merged.check_validate, Some(false));
    }

    #[test]
    fn test_fill_then_resolve() {
        let options = CleaningOptions {
            trim_whitespace: Some(false),
            ..Default::default()
        };
        let config = options.fill(true).resolve().unwrap();

        assert!(config.remove_duplicates);
        assert!(!config.trim_whitespace);
    }

    #[test]
    fn test_config_round_trips_through_options() {
        let config = CleaningConfig::all();
        assert_eq!(CleaningOptions::from(config).resolve().unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        std::fs::write(
            &path,
            r#"{"removeDuplicates": true, "removeEmptyRows": true, "removeEmptyColumns": false,
                "trimWhitespace": true, "checkValidate": false}"#,
        )
        .unwrap();

        let config = CleaningOptions::from_file(&path).unwrap().resolve().unwrap();
        assert!(!config.remove_empty_columns);
        assert!(!config.check_validate);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(CleaningOptions::from_file(&path), Err(SieveError::Config(_))));
    }
}
