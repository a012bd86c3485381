//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Column not present in the uploaded table.
    ColumnNotFound(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
        }
    }
}

impl std::error::Error for MappingError {}
