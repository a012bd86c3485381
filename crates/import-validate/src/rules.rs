//! Compiled validation rules keyed by target field name.
//!
//! Patterns arrive as strings from the import service. They are compiled
//! once when the upload response is loaded; a pattern that fails to compile
//! is recorded as rejected and the field is left without a rule, so its
//! cells always pass.
//!
//! The service writes its patterns for browser `RegExp`, where `\d`, `\w`
//! and `\b` only know ASCII. They are rewritten to ASCII classes before
//! compiling.

use std::collections::BTreeMap;

use import_model::{Table, TargetField};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, ValidationError};
use crate::report::{CellIssue, ValidationReport};

/// A target field's pattern, compiled.
#[derive(Debug, Clone)]
pub struct Rule {
    field: String,
    source: String,
    pattern: Regex,
}

impl Rule {
    pub fn compile(field: &TargetField) -> Result<Self> {
        let pattern = Regex::new(&ascii_classes(&field.validation)).map_err(|source| {
            ValidationError::InvalidPattern {
                field: field.name.clone(),
                pattern: field.validation.clone(),
                source,
            }
        })?;
        Ok(Self {
            field: field.name.clone(),
            source: field.validation.clone(),
            pattern,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The pattern as the service sent it.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Unanchored search, like `RegExp.prototype.test`.
    pub fn matches(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

/// Rewrite the `\d`, `\w` and `\b` escapes (and their negations) to ASCII.
///
/// Bracket classes follow `RegExp` too: `\b` inside one is a backspace, a
/// nested `[` is a literal, `[]` matches nothing and `[^]` matches anything.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push(c);
                    break;
                };
                let replacement = match (escaped, in_class) {
                    ('d', true) => "0-9",
                    ('w', true) => "0-9A-Za-z_",
                    ('d', false) => "[0-9]",
                    ('w', false) => "[0-9A-Za-z_]",
                    ('D', _) => "[^0-9]",
                    ('W', _) => "[^0-9A-Za-z_]",
                    ('b', true) => r"\x08",
                    ('b', false) => r"(?-u:\b)",
                    ('B', false) => r"(?-u:\B)",
                    _ => {
                        out.push(c);
                        out.push(escaped);
                        continue;
                    }
                };
                out.push_str(replacement);
            }
            '[' if in_class => out.push_str(r"\["),
            '[' => {
                let rest = chars.as_str();
                if rest.starts_with(']') {
                    out.push_str(r"[^\x00-\x{10FFFF}]");
                    chars.next();
                } else if rest.starts_with("^]") {
                    out.push_str(r"[\x00-\x{10FFFF}]");
                    chars.nth(1);
                } else {
                    in_class = true;
                    out.push(c);
                    if rest.starts_with('^') {
                        out.push('^');
                        chars.next();
                    }
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// A field whose pattern was refused at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRule {
    pub field: String,
    pub pattern: String,
    pub reason: String,
}

/// All rules for one upload session.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
    rejected: Vec<RejectedRule>,
}

impl RuleSet {
    /// Compile every field's pattern; malformed ones are logged and skipped.
    pub fn compile(fields: &[TargetField]) -> Self {
        let mut set = Self::default();
        for field in fields {
            if field.validation.is_empty() {
                debug!(field = %field.name, "target field has no validation pattern");
                continue;
            }
            match Rule::compile(field) {
                Ok(rule) => set.insert(rule),
                Err(ValidationError::InvalidPattern {
                    field,
                    pattern,
                    source,
                }) => {
                    warn!(%field, %pattern, error = %source, "rejected validation pattern");
                    set.rejected.push(RejectedRule {
                        field,
                        pattern,
                        reason: source.to_string(),
                    });
                }
            }
        }
        set
    }

    /// Compile every field's pattern, failing on the first malformed one.
    pub fn compile_strict(fields: &[TargetField]) -> Result<Self> {
        let mut set = Self::default();
        for field in fields.iter().filter(|f| !f.validation.is_empty()) {
            set.insert(Rule::compile(field)?);
        }
        Ok(set)
    }

    fn insert(&mut self, rule: Rule) {
        if self.rules.contains_key(rule.field()) {
            debug!(field = %rule.field(), "duplicate target field; keeping the first rule");
            return;
        }
        self.rules.insert(rule.field.clone(), rule);
    }

    pub fn rule(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check one cell value against the rule for `field`.
    ///
    /// Empty values and fields without a rule are always valid.
    pub fn is_valid(&self, field: &str, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        self.rule(field).is_none_or(|rule| rule.matches(value))
    }

    /// Collect every invalid cell of `table`.
    ///
    /// `field_for` names the target field a column is validated against;
    /// columns it returns `None` for are skipped.
    pub fn validate_table<F>(&self, table: &Table, field_for: F) -> ValidationReport
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut report = ValidationReport::default();
        let fields: Vec<(&str, String)> = table
            .display_columns()
            .into_iter()
            .filter_map(|column| field_for(column).map(|field| (column, field)))
            .filter(|(_, field)| self.rules.contains_key(field))
            .collect();

        for (index, row) in table.rows().iter().enumerate() {
            for (column, field) in &fields {
                let value = row.get(column).unwrap_or_default();
                if !self.is_valid(field, value) {
                    report.push(CellIssue {
                        row: index,
                        column: (*column).to_string(),
                        field: field.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: &str = r"^\d+(\.\d{1,2})?$";

    #[test]
    fn price_rule() {
        let set = RuleSet::compile(&[TargetField::new("price", PRICE)]);
        assert!(set.is_valid("price", "12.5"));
        assert!(set.is_valid("price", "7"));
        assert!(!set.is_valid("price", "abc"));
        assert!(!set.is_valid("price", "12.555"));
    }

    #[test]
    fn empty_value_and_unknown_field_pass() {
        let set = RuleSet::compile(&[TargetField::new("price", PRICE)]);
        assert!(set.is_valid("price", ""));
        assert!(set.is_valid("sku", "anything"));
    }

    #[test]
    fn search_is_unanchored() {
        let set = RuleSet::compile(&[TargetField::new("code", r"\d{3}")]);
        assert!(set.is_valid("code", "ab123cd"));
        assert!(!set.is_valid("code", "ab12"));
    }

    #[test]
    fn malformed_pattern_is_rejected_upfront() {
        let set = RuleSet::compile(&[
            TargetField::new("broken", "([a-z"),
            TargetField::new("price", PRICE),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected().len(), 1);
        assert_eq!(set.rejected()[0].field, "broken");
        assert!(set.is_valid("broken", "anything at all"));
    }

    #[test]
    fn strict_compile_fails_on_malformed_pattern() {
        let err = RuleSet::compile_strict(&[TargetField::new("broken", "([a-z")]).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn shorthand_classes_become_ascii() {
        assert_eq!(ascii_classes(r"^\d+\.\w$"), r"^[0-9]+\.[0-9A-Za-z_]$");
        assert_eq!(ascii_classes(r"[\d,\W]"), r"[0-9,[^0-9A-Za-z_]]");
        assert_eq!(ascii_classes(r"\bid\B"), r"(?-u:\b)id(?-u:\B)");
        assert_eq!(ascii_classes(r"\\d"), r"\\d");
        assert_eq!(ascii_classes(r"[a[]"), r"[a\[]");
        assert_eq!(ascii_classes(r"\s+\x41"), r"\s+\x41");
    }

    #[test]
    fn empty_bracket_classes() {
        let set = RuleSet::compile(&[
            TargetField::new("never", "a[]"),
            TargetField::new("any", "^a[^]$"),
        ]);
        assert!(set.rejected().is_empty());
        assert!(!set.is_valid("never", "a"));
        assert!(set.is_valid("any", "a\n"));
    }

    #[test]
    fn rule_keeps_the_source_pattern() {
        let rule = Rule::compile(&TargetField::new("price", PRICE)).unwrap();
        assert_eq!(rule.pattern(), PRICE);
    }

    #[test]
    fn first_duplicate_wins() {
        let set = RuleSet::compile(&[
            TargetField::new("qty", r"^\d+$"),
            TargetField::new("qty", r"^[a-z]+$"),
        ]);
        assert!(set.is_valid("qty", "12"));
        assert!(!set.is_valid("qty", "abc"));
    }
}
