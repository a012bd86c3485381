//! Cell validation for the import wizard.
//!
//! Each target field supplied by the import service carries a regex pattern.
//! [`RuleSet`] compiles them once per upload and answers whether a cell
//! value is acceptable:
//!
//! - empty values are always valid
//! - fields without a rule are always valid
//! - otherwise the value must contain a match of the field's pattern
//!
//! Malformed patterns are refused when the rule set is built and reported
//! through [`RuleSet::rejected`]; they never surface per keystroke.

#![deny(unsafe_code)]

pub mod error;
pub mod report;
pub mod rules;

pub use error::{Result, ValidationError};
pub use report::{CellIssue, ValidationReport};
pub use rules::{RejectedRule, Rule, RuleSet};
