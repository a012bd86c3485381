//! Drives a [`Wizard`] against the import service.

use std::path::Path;

use import_client::{ClientError, Download, ImportApi};
use tracing::{info, warn};

use crate::error::{Result, WizardError};
use crate::messages::{
    SAVE_FAILED, SAVE_SUCCEEDED, TEMPLATE_FAILED, TEMPLATE_SAVED, UPLOAD_FAILED,
};
use crate::state::Wizard;
use crate::step::{Step, WizardAction};

/// A wizard bound to a service implementation.
///
/// Service failures never escape as errors: they become the wizard's
/// message and, for saves, move it to [`Step::Failed`].
#[derive(Debug)]
pub struct WizardSession<A> {
    api: A,
    wizard: Wizard,
}

impl<A: ImportApi> WizardSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            wizard: Wizard::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Result<()> {
        self.wizard.dispatch(action)
    }

    fn require(&self, step: Step, action: &'static str) -> Result<()> {
        if self.wizard.step() == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.wizard.step(),
                action,
            })
        }
    }

    /// Send `file` for parsing with the selected template.
    ///
    /// On failure the wizard stays on the upload step with a message.
    pub async fn upload(&mut self, file: &Path) -> Result<()> {
        self.require(Step::Upload, "upload a file")?;
        let template = self.wizard.template();
        match self.api.process_file(file, template).await {
            Ok(response) => self.wizard.dispatch(WizardAction::Loaded(response)),
            Err(err) => {
                warn!(file = %file.display(), error = %err, "upload failed");
                let message = match &err {
                    ClientError::UnsupportedFile(_) => err.user_message(),
                    _ => UPLOAD_FAILED,
                };
                self.wizard
                    .dispatch(WizardAction::UploadFailed(message.to_string()))
            }
        }
    }

    /// Save the previewed table.
    ///
    /// Returns the file the service sent back, if any.
    pub async fn save(&mut self) -> Result<Option<Download>> {
        self.require(Step::Previewing, "save")?;
        let result = self.api.save_data(self.wizard.preview()).await;
        self.finish(result, SAVE_SUCCEEDED, SAVE_FAILED)
    }

    /// Save the previewed table as a template named `name`.
    pub async fn save_template(&mut self, name: &str) -> Result<Option<Download>> {
        self.require(Step::Previewing, "save a template")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(WizardError::TemplateNameRequired);
        }
        let result = self.api.save_template(self.wizard.preview(), name).await;
        self.finish(result, TEMPLATE_SAVED, TEMPLATE_FAILED)
    }

    fn finish(
        &mut self,
        result: import_client::Result<import_client::SaveOutcome>,
        succeeded: &str,
        failed: &str,
    ) -> Result<Option<Download>> {
        match result {
            Ok(outcome) => {
                let message = outcome.message.unwrap_or_else(|| succeeded.to_string());
                info!(download = outcome.download.is_some(), "save completed");
                self.wizard.dispatch(WizardAction::Saved { message })?;
                Ok(outcome.download)
            }
            Err(err) => {
                warn!(error = %err, retryable = err.is_retryable(), "save failed");
                let message = failure_message(&err, failed).to_string();
                self.wizard.dispatch(WizardAction::SaveFailed { message })?;
                Ok(None)
            }
        }
    }
}

/// Message for a failed save: the service's own explanation when there is
/// one, otherwise `fallback`.
fn failure_message<'a>(err: &'a ClientError, fallback: &'a str) -> &'a str {
    match err {
        ClientError::Status { .. }
        | ClientError::Timeout { .. }
        | ClientError::Rejected(_)
        | ClientError::Network(_) => err.user_message(),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages() {
        let err = ClientError::Status {
            status: 401,
            body: String::new(),
        };
        assert!(failure_message(&err, SAVE_FAILED).starts_with("Authorization error"));
        let err = ClientError::JsonParse("eof".to_string());
        assert_eq!(failure_message(&err, TEMPLATE_FAILED), TEMPLATE_FAILED);
    }
}
