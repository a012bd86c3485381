//! Error types for rule compilation.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The service sent a pattern the regex engine cannot compile.
    #[error("invalid pattern for field '{field}': {pattern}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
