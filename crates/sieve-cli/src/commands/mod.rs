//! CLI command implementations.

pub mod clean;
pub mod inspect;
pub mod validate;

use colored::Colorize;
use sieve::{IssueSummary, ValidationIssue};

/// Print an issue summary followed by up to `limit` issues.
pub(crate) fn print_issues(issues: &[ValidationIssue], summary: &IssueSummary, limit: usize) {
    if summary.is_clean() {
        println!("{}", "No issues found - data looks clean!".green());
        return;
    }

    println!(
        "Found {} issues in {} rows across {} columns",
        summary.total.to_string().white().bold(),
        summary.rows_affected.to_string().yellow(),
        summary.columns.len().to_string().yellow()
    );
    for (category, count) in &summary.by_category {
        println!("  {} ({})", category.label().bold(), count);
        for (kind, count) in summary.by_kind.iter().filter(|(k, _)| k.category() == *category) {
            println!("    {:28} {}", kind.as_str(), count);
        }
    }

    println!();
    for issue in issues.iter().take(limit) {
        println!(
            "  row {:>5}  {:20} {:24} {}",
            issue.row,
            issue.column,
            issue.issue.as_str().red(),
            format!("{:?}", issue.value.as_text()).dimmed()
        );
        if let Some(ref suggestion) = issue.suggestion {
            println!("             {}", suggestion.cyan());
        }
    }
    if issues.len() > limit {
        println!("  ... and {} more", issues.len() - limit);
    }
}
