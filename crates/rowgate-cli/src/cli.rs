//! CLI argument definitions for rowgate.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use rowgate_cli::logging::LogFormat;
use rowgate_ingest::MAX_CSV_FILE_SIZE;
use rowgate_sink::DEFAULT_TABLE;

#[derive(Parser)]
#[command(
    name = "rowgate",
    version,
    about = "Validate a CSV file and append the accepted rows to a SQLite table",
    long_about = "Validate a CSV file and append the accepted rows to a SQLite table.\n\n\
                  Required columns and per-field rules come from a JSON rule set \
                  (default: passenger manifest rules for `survived` and `age`).\n\
                  Rejected rows are skipped and reported; schema, type and storage \
                  failures abort the run with a distinct exit code."
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

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
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

    /// Include cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a CSV file and append accepted rows to the destination table.
    Run(RunArgs),

    /// Print the active rule set.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV file to load, or `-` to read from stdin.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// SQLite database file (created if missing).
    #[arg(long = "database", value_name = "PATH", default_value = "rowgate.db")]
    pub database: PathBuf,

    /// Destination table name.
    #[arg(long = "table", value_name = "NAME", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// JSON rule set file (default: built-in passenger rules).
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Validate and report without writing to the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Largest input file accepted, in bytes.
    #[arg(long = "max-file-size", value_name = "BYTES", default_value_t = MAX_CSV_FILE_SIZE)]
    pub max_file_size: u64,

    /// Result format printed to stdout.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// JSON rule set file (default: built-in passenger rules).
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Result format printed to stdout.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
