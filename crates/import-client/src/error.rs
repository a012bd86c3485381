//! Error types for the import service client.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the import service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, TLS, broken body.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("import service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The client-side timer fired before the service answered.
    #[error("request timed out after {}s", .after.as_secs_f32())]
    Timeout {
        /// Configured limit.
        after: Duration,
    },

    /// The service answered but reported `success: false`.
    #[error("request rejected by the import service: {0}")]
    Rejected(String),

    /// The download payload was not valid base64.
    #[error("invalid download payload: {0}")]
    Decode(String),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Local file I/O failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The file picked for upload is not a spreadsheet.
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),

    /// Missing or malformed client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach the import service. Please check your connection."
            }
            Self::Status { status, .. } => status_message(*status),
            Self::Timeout { .. } => "The request timed out. Please try again.",
            Self::Rejected(message) if !message.trim().is_empty() => message,
            Self::Rejected(_) => "The import service could not save the data.",
            Self::Decode(_) => "The import service returned a file that could not be read.",
            Self::JsonParse(_) => "The import service returned an unexpected response.",
            Self::Io(_) => "Could not read or write a local file.",
            Self::UnsupportedFile(_) => "Please upload only Excel or CSV files",
            Self::Config(_) => "The import service is not configured.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// User-facing message for an HTTP status returned by a save call.
#[must_use]
pub fn status_message(status: u16) -> &'static str {
    match status {
        413 => "The data size is too large. Please reduce the amount of data and try again.",
        400 => "Invalid data format. Please check the table and try again.",
        401 | 403 => "Authorization error. You are not allowed to perform this action.",
        404 => "The import service endpoint was not found.",
        500 => "Server error. Please try again later.",
        _ => "An error occurred while saving the data. Please try again.",
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<base64::DecodeError> for ClientError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
