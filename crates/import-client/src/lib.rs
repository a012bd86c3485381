//! Client for the spreadsheet import service.
//!
//! The service exposes three endpoints:
//!
//! - `POST {api_url}`: multipart upload (`file`, `template`), answered with
//!   the parsed rows and the target schema
//! - `POST {api_url}/save`: JSON `{data}`
//! - `POST {api_url}/save/templates`: JSON `{data, templateName}`, limited by
//!   a client-side timeout (five minutes by default)
//!
//! Save endpoints answer with a message, a base64 file to download, or both.
//!
//! # Example
//!
//! ```no_run
//! use import_client::{ApiClient, ClientConfig, ImportApi};
//! use import_model::TemplateType;
//!
//! async fn upload() -> import_client::Result<()> {
//!     let config = ClientConfig::load(None)?;
//!     let client = ApiClient::new(&config)?;
//!     let upload = client
//!         .process_file("orders.csv".as_ref(), TemplateType::Other)
//!         .await?;
//!     let outcome = client.save_data(&upload.data).await?;
//!     if let Some(file) = outcome.download {
//!         file.write_to(".".as_ref())?;
//!     }
//!     Ok(())
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use import_model::{Table, TemplateType, UploadResponse};

pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod upload;

pub use client::ApiClient;
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_TEMPLATE_TIMEOUT_SECS};
pub use download::{Download, SaveOutcome, decode_base64};
pub use error::{ClientError, Result, status_message};
pub use upload::{SUPPORTED_EXTENSIONS, check_upload_path};

/// Operations the import wizard needs from the service.
///
/// The wizard runs on a single thread, so implementations need not be `Send`.
#[async_trait(?Send)]
pub trait ImportApi {
    /// Upload a spreadsheet for parsing.
    async fn process_file(&self, file: &Path, template: TemplateType) -> Result<UploadResponse>;

    /// Persist the edited table.
    async fn save_data(&self, table: &Table) -> Result<SaveOutcome>;

    /// Persist the edited table as a reusable template named `name`.
    async fn save_template(&self, table: &Table, name: &str) -> Result<SaveOutcome>;
}
