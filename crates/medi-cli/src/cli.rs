//! CLI argument definitions for the catalog search tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use medi_cli::logging::LogFormat;
use medi_core::DEFAULT_DEBOUNCE_MS;
use medi_model::SearchField;

#[derive(Parser)]
#[command(
    name = "medirembours",
    version,
    about = "MediRembours - search the catalog of reimbursed drugs",
    long_about = "Search the catalog of reimbursed drugs by commercial name or DCI\n\
                  and show the reimbursement condition of the selected result.\n\n\
                  Uses the bundled catalog unless --drugs and --conditions are given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub data: DataArgs,

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
}

/// Catalog tables to load instead of the bundled ones.
#[derive(Args)]
pub struct DataArgs {
    /// Drug table (.json workbook export or .csv).
    #[arg(long = "drugs", value_name = "PATH", global = true)]
    pub drugs: Option<PathBuf>,

    /// Reimbursement condition table (.json or .csv).
    #[arg(long = "conditions", value_name = "PATH", global = true)]
    pub conditions: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one search and print the resulting view.
    Search(SearchArgs),

    /// Search interactively, one query per line.
    Interactive(InteractiveArgs),

    /// Show the catalog banner and statistics.
    Info,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive substring).
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Field to search.
    #[arg(long = "field", value_enum, default_value = "dci")]
    pub field: FieldArg,

    /// Select result row N (1-based) instead of the first one.
    #[arg(long = "select", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub select: Option<u32>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct InteractiveArgs {
    /// Field searched at start (switch with :dci / :commercial).
    #[arg(long = "field", value_enum, default_value = "dci")]
    pub field: ToggleFieldArg,

    /// Delay before a query edit triggers a search.
    #[arg(long = "debounce-ms", value_name = "MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Commercial,
    Dci,
    Code,
    Tariff,
}

impl From<FieldArg> for SearchField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Commercial => SearchField::CommercialName,
            FieldArg::Dci => SearchField::GenericName,
            FieldArg::Code => SearchField::Code,
            FieldArg::Tariff => SearchField::Tariff,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToggleFieldArg {
    Commercial,
    Dci,
}

impl From<ToggleFieldArg> for SearchField {
    fn from(value: ToggleFieldArg) -> Self {
        match value {
            ToggleFieldArg::Commercial => SearchField::CommercialName,
            ToggleFieldArg::Dci => SearchField::GenericName,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
