//! Column mapping for uploaded tables.

#![deny(unsafe_code)]

pub mod error;
pub mod state;

pub use error::MappingError;
pub use state::{ColumnMapping, DEFAULT_LABEL, MappingSummary};
