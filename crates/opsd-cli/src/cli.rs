//! CLI argument definitions for the OPSD pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "opsd-pipeline",
    version,
    about = "OPSD pipeline - download, audit, and clean hourly electricity data",
    long_about = "Batch pipeline for the Open Power System Data hourly European\n\
                  electricity time series. Downloads the singleindex CSV, profiles\n\
                  missing values and timestamp coverage, and produces a cleaned\n\
                  focus-country extract with calendar features."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pipeline configuration file.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = "config/pipeline.toml",
        global = true
    )]
    pub config: PathBuf,

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

#[derive(Subcommand)]
pub enum Command {
    /// Download a configured data source into its destination directory.
    Fetch(FetchArgs),

    /// First look at the raw CSV; writes a plain-text exploration report.
    Explore(ExploreArgs),

    /// Full data-quality analysis; writes a JSON quality report.
    Analyze(AnalyzeArgs),

    /// Select focus-country columns, fill gaps, and write the cleaned CSV.
    Clean(CleanArgs),
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Name of the configured data source (defaults to the only one).
    #[arg(long = "source", value_name = "NAME")]
    pub source: Option<String>,

    /// Download again even when the destination file already exists.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct ExploreArgs {
    /// Input CSV (defaults to the configured source's download path).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the report file is written to.
    #[arg(long = "report-dir", value_name = "DIR", default_value = "reports")]
    pub report_dir: PathBuf,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Input CSV (defaults to the configured source's download path).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the report file is written to.
    #[arg(long = "report-dir", value_name = "DIR", default_value = "reports")]
    pub report_dir: PathBuf,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Input CSV (defaults to the configured source's download path).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Directory the cleaned CSV files are written to.
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = "data/processed"
    )]
    pub output_dir: PathBuf,
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
