//! Heuristic cell validation.
//!
//! Columns are classified by name into a [`Category`]; every non-empty cell
//! is then checked by that category's [`CellValidator`], producing
//! [`ValidationIssue`]s with a suggestion text each.

mod category;
mod engine;
mod issue;
mod validators;

pub use category::{classify, Category, PRECEDENCE};
pub use engine::{validate, ValidationEngine};
pub use issue::{IssueKind, IssueSummary, ValidationIssue};
pub use validators::{
    parse_date, AddressValidator, Cell, CellValidator, DateValidator, EmailValidator, IdValidator,
    NameValidator, NumericValidator, PhoneValidator, StatusValidator, TextQualityValidator,
    UrlValidator,
};
