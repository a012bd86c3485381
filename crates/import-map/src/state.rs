//! Mapping state for the column header selectors.
//!
//! Every source column shows a selector whose value is the column's
//! *label*: its own name (left as uploaded), [`DEFAULT_LABEL`] (excluded),
//! or a target field name. A non-default label has at most one holder;
//! assigning it to a column demotes the previous holder to the default.

use indexmap::{IndexMap, IndexSet};
use import_model::UploadResponse;
use serde::Serialize;
use tracing::debug;

use crate::error::MappingError;

/// Sentinel label for columns the user chose not to import.
pub const DEFAULT_LABEL: &str = "Default";

/// Column → label assignments for one upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Source columns, in table order.
    columns: Vec<String>,
    /// Explicit assignments; a column without an entry is labelled with its own name.
    assigned: IndexMap<String, String>,
    /// Labels offered in every selector after the column's own name and the default.
    choices: Vec<String>,
    /// Names of the target fields declared by the service.
    targets: IndexSet<String>,
    /// Columns the service could not match.
    unmapped: IndexSet<String>,
}

impl ColumnMapping {
    /// Create a mapping in which every column keeps its own name.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Build the initial mapping for an upload response.
    pub fn from_upload(response: &UploadResponse) -> Self {
        Self::new(response.data.display_columns())
            .with_choices(response.empty_fields.iter().cloned())
            .with_targets(response.target_fields.iter().map(|f| f.name.clone()))
            .with_unmapped(response.unmapped_column_names())
    }

    #[must_use]
    pub fn with_choices<I: IntoIterator<Item = String>>(mut self, choices: I) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_targets<I: IntoIterator<Item = String>>(mut self, targets: I) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_unmapped<I: IntoIterator<Item = String>>(mut self, unmapped: I) -> Self {
        self.unmapped = unmapped.into_iter().collect();
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Current label of a known column.
    pub fn label(&self, column: &str) -> Option<&str> {
        let known = self.columns.iter().find(|c| *c == column)?;
        Some(self.assigned.get(column).unwrap_or(known))
    }

    /// `(column, label)` pairs in column order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|column| {
            let label = self.assigned.get(column).unwrap_or(column);
            (column.as_str(), label.as_str())
        })
    }

    /// Column currently holding `label`, if any.
    pub fn holder(&self, label: &str) -> Option<&str> {
        if label == DEFAULT_LABEL {
            return None;
        }
        self.labels()
            .find(|(_, held)| *held == label)
            .map(|(column, _)| column)
    }

    /// Assign `label` to `column`.
    ///
    /// Any other column currently holding a non-default `label` is reset to
    /// [`DEFAULT_LABEL`]. Returns the demoted columns.
    pub fn set_mapping(&mut self, column: &str, label: &str) -> Result<Vec<String>, MappingError> {
        if !self.contains(column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }

        let mut demoted = Vec::new();
        if label != DEFAULT_LABEL {
            demoted = self
                .labels()
                .filter(|(other, held)| *other != column && *held == label)
                .map(|(other, _)| other.to_string())
                .collect();
            for other in &demoted {
                debug!(column = %other, label, "label reassigned; demoting previous holder");
                self.assigned
                    .insert(other.clone(), DEFAULT_LABEL.to_string());
            }
        }

        if label == column {
            self.assigned.shift_remove(column);
        } else {
            self.assigned.insert(column.to_string(), label.to_string());
        }
        Ok(demoted)
    }

    /// Put every column back to its own name.
    pub fn clear(&mut self) {
        self.assigned.clear();
    }

    pub fn is_target_label(&self, label: &str) -> bool {
        self.targets.contains(label)
    }

    /// Whether `label` is something the selector for `column` can show.
    pub fn is_recognized(&self, column: &str, label: &str) -> bool {
        label == column
            || label == DEFAULT_LABEL
            || self.is_target_label(label)
            || self.choices.iter().any(|c| c == label)
    }

    /// Inactive columns are grayed out, read-only and left out of the save
    /// payload: they carry the default label or one no selector offers.
    pub fn is_inactive(&self, column: &str) -> bool {
        match self.label(column) {
            Some(label) => label == DEFAULT_LABEL || !self.is_recognized(column, label),
            None => true,
        }
    }

    /// Whether the service flagged `column` as not matching its schema.
    pub fn is_flagged_unmapped(&self, column: &str) -> bool {
        self.unmapped.contains(column)
    }

    /// Cells of inactive columns, and of flagged columns still under their
    /// own name, cannot be edited.
    pub fn is_read_only(&self, column: &str) -> bool {
        self.is_inactive(column)
            || (self.is_flagged_unmapped(column) && self.label(column) == Some(column))
    }

    /// Selector choices for `column`: its own name, the default, then the
    /// service's labels, without repeats.
    pub fn options<'a>(&'a self, column: &'a str) -> Vec<&'a str> {
        let mut options: IndexSet<&str> = IndexSet::new();
        options.insert(column);
        options.insert(DEFAULT_LABEL);
        options.extend(self.choices.iter().map(String::as_str));
        options.into_iter().collect()
    }

    /// Columns to carry into the save payload with their outgoing names.
    pub fn selection(&self) -> Vec<(String, String)> {
        self.labels()
            .filter(|(column, _)| !self.is_inactive(column))
            .map(|(column, label)| (column.to_string(), label.to_string()))
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total: self.columns.len(),
            ..MappingSummary::default()
        };
        for (column, label) in self.labels() {
            if label == DEFAULT_LABEL {
                summary.defaulted += 1;
            } else if !self.is_recognized(column, label) {
                summary.unrecognized += 1;
            } else if label == column {
                summary.unchanged += 1;
            } else {
                summary.renamed += 1;
            }
        }
        summary
    }
}

/// Counts of columns by label kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub total: usize,
    /// Columns assigned to a different label.
    pub renamed: usize,
    /// Columns left with their own name.
    pub unchanged: usize,
    /// Columns excluded with the default label.
    pub defaulted: usize,
    /// Columns holding a label no selector offers.
    pub unrecognized: usize,
}
