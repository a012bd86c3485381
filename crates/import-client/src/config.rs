//! Client configuration.
//!
//! The service URL is resolved from, in order: an explicit override, the
//! `IMPORT_API_URL` environment variable, the `api_url` key of the TOML
//! config file, and finally the value `IMPORT_API_URL` had at build time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Environment variable holding the import service base URL.
pub const API_URL_ENV: &str = "IMPORT_API_URL";

/// Client-side limit for template saves.
pub const DEFAULT_TEMPLATE_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the import service (upload endpoint).
    pub api_url: Option<String>,
    /// Timeout for `save/templates`, in seconds.
    pub template_timeout_secs: u64,
    /// Overall timeout for every other request, in seconds. No limit when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: option_env!("IMPORT_API_URL").map(str::to_string),
            template_timeout_secs: DEFAULT_TEMPLATE_TIMEOUT_SECS,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::read(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading client config");
        let text = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Platform config file location (`<config dir>/sheet-import/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sheet-import").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = Some(url);
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// The configured base URL without a trailing slash.
    pub fn api_url(&self) -> Result<&str> {
        self.api_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                ClientError::Config(format!(
                    "no import service URL configured; set {API_URL_ENV} or pass --api-url"
                ))
            })
    }

    pub fn template_timeout(&self) -> Duration {
        Duration::from_secs(self.template_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_keeps_defaults_for_missing_keys() {
        let config = ClientConfig::from_toml_str(r#"api_url = "https://import.example/api""#)
            .expect("parse config");
        assert_eq!(config.api_url().unwrap(), "https://import.example/api");
        assert_eq!(config.template_timeout(), Duration::from_secs(300));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ClientConfig::from_toml_str("template_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = ClientConfig::default().with_api_url("https://file.example");
        config.apply_env(|key| (key == API_URL_ENV).then(|| "https://env.example/".to_string()));
        assert_eq!(config.api_url().unwrap(), "https://env.example");
    }

    #[test]
    fn blank_env_is_ignored() {
        let mut config = ClientConfig::default().with_api_url("https://file.example");
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api_url().unwrap(), "https://file.example");
    }

    #[test]
    fn missing_url_is_reported() {
        let config = ClientConfig {
            api_url: None,
            ..ClientConfig::default()
        };
        let err = config.api_url().unwrap_err();
        assert!(err.to_string().contains(API_URL_ENV));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = ClientConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
