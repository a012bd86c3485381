//! CLI argument definitions for the spreadsheet import wizard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use import_cli::edits::{CellEdit, MappingArg};
use import_model::TemplateType;

#[derive(Parser)]
#[command(
    name = "sheet-import",
    version,
    about = "Spreadsheet import wizard - map, fix and save uploaded tables",
    long_about = "Upload an Excel or CSV file to the import service, map its columns to \
                  the target fields, fix invalid cells and save the result.\n\n\
                  The service URL comes from --api-url, IMPORT_API_URL or the config file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Base URL of the import service.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Config file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a file and show how its columns would be mapped.
    Inspect(InspectArgs),

    /// Upload, map, edit and save a file.
    Import(ImportArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// Excel or CSV file to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Template the service should parse the file with.
    #[arg(long = "template", value_enum, default_value = "other")]
    pub template: TemplateArg,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Excel or CSV file to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Template the service should parse the file with.
    #[arg(long = "template", value_enum, default_value = "other")]
    pub template: TemplateArg,

    /// Map a column to a label; use "Default" to leave it out.
    ///
    /// Applied in order, so a later mapping can take a label from an
    /// earlier one.
    #[arg(long = "map", value_name = "COLUMN=LABEL")]
    pub map: Vec<MappingArg>,

    /// Replace a cell value (rows are numbered from 1).
    #[arg(long = "set", value_name = "ROW:COLUMN=VALUE")]
    pub set: Vec<CellEdit>,

    /// Save the result as a reusable template with this name.
    #[arg(long = "save-template", value_name = "NAME")]
    pub save_template: Option<String>,

    /// Directory for files returned by the service (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the payload instead of saving it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI template choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TemplateArg {
    Shopify,
    Amazon,
    Other,
}

impl From<TemplateArg> for TemplateType {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Shopify => TemplateType::Shopify,
            TemplateArg::Amazon => TemplateType::Amazon,
            TemplateArg::Other => TemplateType::Other,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
