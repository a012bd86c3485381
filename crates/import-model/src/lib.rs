//! Data model shared by the import wizard crates.

#![deny(unsafe_code)]

pub mod error;
pub mod table;
pub mod wire;

pub use error::{ModelError, Result};
pub use table::{Row, Table, is_positional_key};
pub use wire::{
    SaveRequest, SaveResponse, TargetField, TemplateType, UNMAPPED_PREFIX, UploadResponse,
};
