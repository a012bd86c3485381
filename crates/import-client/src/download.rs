//! Save outcomes and the files the service sends back.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use import_model::SaveResponse;
use tracing::info;

use crate::error::{ClientError, Result};

const FALLBACK_FILENAME: &str = "download";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A decoded file returned by a save call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Final path component of the server-supplied name.
    pub fn safe_filename(&self) -> String {
        Path::new(self.filename.trim())
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILENAME)
            .to_string()
    }

    /// Write the file into `dir`, returning the written path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.safe_filename());
        fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "wrote download");
        Ok(path)
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub message: Option<String>,
    pub download: Option<Download>,
}

impl SaveOutcome {
    /// Interpret a save response.
    ///
    /// `success: false` becomes [`ClientError::Rejected`]; a `data` field is
    /// decoded from base64 into a [`Download`].
    pub fn from_response(response: SaveResponse) -> Result<Self> {
        if response.is_rejected() {
            return Err(ClientError::Rejected(response.message.unwrap_or_default()));
        }
        let download = match response.data.as_deref() {
            Some(data) if !data.trim().is_empty() => Some(Download {
                filename: response
                    .filename
                    .clone()
                    .unwrap_or_else(|| FALLBACK_FILENAME.to_string()),
                content_type: response
                    .content_type
                    .clone()
                    .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
                bytes: decode_base64(data)?,
            }),
            _ => None,
        };
        Ok(Self {
            message: response.message.filter(|m| !m.trim().is_empty()),
            download,
        })
    }
}

/// Decode a base64 payload, ignoring whitespace and a `data:` URL prefix.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(cleaned)?)
}
