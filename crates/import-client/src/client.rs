//! HTTP client for the import service.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use import_model::{SaveRequest, SaveResponse, Table, TemplateType, UploadResponse};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::ImportApi;
use crate::config::ClientConfig;
use crate::download::SaveOutcome;
use crate::error::{ClientError, Result};
use crate::upload::{check_upload_path, content_type_for};

/// User agent string for service requests.
const USER_AGENT_VALUE: &str = concat!("sheet-import/", env!("CARGO_PKG_VERSION"));

/// Client for the upload and save endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    /// Applied to uploads and data saves; template saves use `template_timeout`.
    request_timeout: Option<Duration>,
    template_timeout: Duration,
}

impl ApiClient {
    /// Creates a client for the service configured in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.api_url()?.to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("invalid service URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            request_timeout: config.request_timeout(),
            template_timeout: config.template_timeout(),
        })
    }

    /// Override the upload and data-save timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Override the template-save timeout.
    #[must_use]
    pub fn with_template_timeout(mut self, timeout: Duration) -> Self {
        self.template_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn template_timeout(&self) -> Duration {
        self.template_timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post(&self, url: &str, timeout: Option<Duration>) -> reqwest::RequestBuilder {
        let request = self.http.post(url);
        match timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    async fn save(
        &self,
        url: String,
        body: &SaveRequest<'_>,
        timeout: Option<Duration>,
    ) -> Result<SaveOutcome> {
        info!(url = %url, rows = body.data.len(), "saving table");
        let response = self.post(&url, timeout).json(body).send().await?;
        let response: SaveResponse = read_json(response).await?;
        SaveOutcome::from_response(response)
    }
}

#[async_trait(?Send)]
impl ImportApi for ApiClient {
    async fn process_file(&self, file: &Path, template: TemplateType) -> Result<UploadResponse> {
        check_upload_path(file)?;
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        info!(file = %file_name, bytes = bytes.len(), template = template.as_str(), "uploading file");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type_for(file))?;
        let form = Form::new()
            .part("file", part)
            .text("template", template.as_str());

        let response = self
            .post(&self.base_url, self.request_timeout)
            .multipart(form)
            .send()
            .await?;
        let upload: UploadResponse = read_json(response).await?;
        debug!(
            rows = upload.data.len(),
            columns = upload.data.columns().len(),
            target_fields = upload.target_fields.len(),
            "upload parsed"
        );
        Ok(upload)
    }

    async fn save_data(&self, table: &Table) -> Result<SaveOutcome> {
        self.save(
            self.endpoint("save"),
            &SaveRequest::data(table),
            self.request_timeout,
        )
        .await
    }

    async fn save_template(&self, table: &Table, name: &str) -> Result<SaveOutcome> {
        let request = SaveRequest::template(table, name);
        let save = self.save(self.endpoint("save/templates"), &request, None);
        // Dropping the losing future cancels the in-flight request.
        match tokio::time::timeout(self.template_timeout, save).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    template = name,
                    after_secs = self.template_timeout.as_secs_f32(),
                    "template save timed out"
                );
                Err(ClientError::Timeout {
                    after: self.template_timeout,
                })
            }
        }
    }
}

/// Check the status and parse the JSON body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "import service returned an error status");
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
