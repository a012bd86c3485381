//! Spreadsheet upload checks.

use std::path::Path;

use crate::error::{ClientError, Result};

/// File extensions the import service can parse.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Refuse anything that is not an Excel or CSV file.
pub fn check_upload_path(path: &Path) -> Result<()> {
    match extension(path) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ClientError::UnsupportedFile(path.display().to_string())),
    }
}

/// MIME type sent with the multipart file part.
pub fn content_type_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}
