//! Invalid-cell reports.
//!
//! Reports are display-only: they drive cell markers and summaries but never
//! block a save.

use std::collections::BTreeMap;

use serde::Serialize;

/// One cell whose value does not match its field's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellIssue {
    pub row: usize,
    pub column: String,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<CellIssue>,
}

impl ValidationReport {
    pub(crate) fn push(&mut self, issue: CellIssue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_flagged(&self, row: usize, column: &str) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.row == row && issue.column == column)
    }

    /// Invalid-cell counts per column.
    pub fn counts_by_column(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.column.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
