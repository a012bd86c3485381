use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Instrument, debug, info, info_span, warn};

use import_cli::logging::redact_value;
use import_cli::render::{
    editing_table, issue_table, mapping_table, payload_json, preview_table, step_line,
};
use import_client::{ApiClient, ClientConfig};
use import_model::TemplateType;
use import_wizard::messages::UPLOAD_FAILED;
use import_wizard::{Step, WizardAction, WizardSession};

use crate::cli::{ImportArgs, InspectArgs};

/// How an `import` run ended.
#[derive(Debug)]
pub struct ImportResult {
    pub step: Step,
    pub message: Option<String>,
    /// Where the returned file was written, if the service sent one.
    pub download: Option<PathBuf>,
}

impl ImportResult {
    pub fn failed(&self) -> bool {
        self.step == Step::Failed
    }
}

pub async fn run_inspect(args: &InspectArgs, config: &ClientConfig) -> Result<()> {
    let span = info_span!("inspect", file = %args.file.display());
    let session = start(config, args.template.into(), &args.file)
        .instrument(span)
        .await?;
    let wizard = session.wizard();

    println!("{}", step_line(wizard));
    println!("{}", mapping_table(wizard.mapping()));
    println!("{}", editing_table(wizard));
    if let Some(table) = issue_table(&wizard.validation_report()) {
        println!("Invalid cells:");
        println!("{table}");
    }
    Ok(())
}

pub async fn run_import(args: &ImportArgs, config: &ClientConfig) -> Result<ImportResult> {
    let span = info_span!("import", file = %args.file.display());
    import(args, config).instrument(span).await
}

async fn import(args: &ImportArgs, config: &ClientConfig) -> Result<ImportResult> {
    let mut session = start(config, args.template.into(), &args.file).await?;

    for mapping in &args.map {
        session
            .dispatch(mapping.action())
            .with_context(|| format!("map {mapping}"))?;
    }
    for edit in &args.set {
        session
            .dispatch(edit.action())
            .with_context(|| format!("edit row {} of column '{}'", edit.row, edit.column))?;
        debug!(
            row = edit.row,
            column = %edit.column,
            value = redact_value(&edit.value),
            "cell edited"
        );
    }

    let wizard = session.wizard();
    println!("{}", step_line(wizard));
    println!("{}", editing_table(wizard));
    let report = wizard.validation_report();
    if let Some(table) = issue_table(&report) {
        warn!(invalid = report.len(), "saving with invalid cells");
        println!("Invalid cells:");
        println!("{table}");
    }

    session.dispatch(WizardAction::Next)?;
    let wizard = session.wizard();
    let summary = wizard.mapping().summary();
    println!("{}", step_line(wizard));
    println!("{}", preview_table(wizard.preview()));
    println!(
        "{} of {} columns will be sent ({} renamed, {} excluded)",
        wizard.preview().columns().len(),
        summary.total,
        summary.renamed,
        summary.defaulted + summary.unrecognized
    );

    if args.dry_run {
        let payload = payload_json(wizard.preview(), args.save_template.as_deref())
            .context("serialize payload")?;
        println!("{payload}");
        return Ok(ImportResult {
            step: wizard.step(),
            message: None,
            download: None,
        });
    }

    let download = match args.save_template.as_deref() {
        Some(name) => {
            with_spinner(format!("Saving template {name}"), session.save_template(name)).await?
        }
        None => with_spinner("Saving".to_string(), session.save()).await?,
    };

    let wizard = session.wizard();
    let mut written = None;
    if let Some(download) = download {
        let dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let path = download
            .write_to(&dir)
            .with_context(|| format!("write {}", download.safe_filename()))?;
        written = Some(path);
    }
    Ok(ImportResult {
        step: wizard.step(),
        message: wizard.message().map(str::to_string),
        download: written,
    })
}

/// Build the client, pick the template and upload `file`.
async fn start(
    config: &ClientConfig,
    template: TemplateType,
    file: &Path,
) -> Result<WizardSession<ApiClient>> {
    let client = ApiClient::new(config).context("create import service client")?;
    info!(url = client.base_url(), "using import service");
    let mut session = WizardSession::new(client);

    session.dispatch(WizardAction::SelectTemplate(template))?;
    if let Some(notice) = session.wizard().message() {
        eprintln!("note: {notice}");
    }

    let label = format!("Uploading {}", file.display());
    with_spinner(label, session.upload(file)).await?;

    let wizard = session.wizard();
    if wizard.step() == Step::Upload {
        bail!("{}", wizard.message().unwrap_or(UPLOAD_FAILED));
    }
    for rejected in wizard.rejected_rules() {
        eprintln!(
            "warning: ignoring the pattern for '{}': {}",
            rejected.field, rejected.reason
        );
    }
    Ok(session)
}

async fn with_spinner<F: Future>(message: String, task: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = task.await;
    spinner.finish_and_clear();
    output
}

pub fn print_result(result: &ImportResult) {
    if let Some(message) = &result.message {
        if result.failed() {
            eprintln!("error: {message}");
        } else {
            println!("{message}");
        }
    }
    if let Some(path) = &result.download {
        println!("Saved file: {}", path.display());
    }
}
