//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use colsplit_cli::pipeline::SelectionPlan;
use colsplit_model::OutputFormat;

#[derive(Parser)]
#[command(
    name = "colsplit",
    version,
    about = "Pick columns from a CSV file and export them as CSV or JSON",
    long_about = "Pick columns from a delimited text file with a header row and export them.\n\n\
                  Exports can be split into several files of at most N rows, bundled\n\
                  into a zip archive, or copied to the clipboard as a single document."
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

    /// Read settings from this file instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the columns of a file, marking the selected ones.
    Columns(ColumnsArgs),

    /// Export the selected columns to a file or a zip of files.
    Export(ExportArgs),

    /// Copy the selected columns to the clipboard as one document.
    Copy(CopyArgs),

    /// Show the settings file location and the effective settings.
    Config(ConfigArgs),
}

/// Column selection flags, applied in order: --filter, --all, --none, --column.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Only show columns containing TEXT (case-insensitive).
    ///
    /// --all and --none only affect the columns matching the filter.
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Select every visible column.
    #[arg(long = "all")]
    pub all: bool,

    /// Deselect every visible column.
    #[arg(long = "none")]
    pub none: bool,

    /// Toggle a column by exact name (repeatable, or comma separated).
    #[arg(short = 'c', long = "column", value_name = "NAME", value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl SelectionArgs {
    pub fn plan(&self) -> SelectionPlan {
        SelectionPlan {
            filter: self.filter.clone(),
            select_all: self.all,
            deselect_all: self.none,
            toggles: self.columns.clone(),
        }
    }
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Delimited text file with a header row.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Delimited text file with a header row.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format (defaults to the configured format).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Maximum rows per file; blank, 0 or invalid keeps all rows in one file.
    #[arg(long = "rows-per-file", value_name = "N", allow_hyphen_values = true)]
    pub rows_per_file: Option<String>,

    /// Directory to write to (defaults to the configured directory, then
    /// the current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base name of the exported files (defaults to the input file name).
    #[arg(long = "name", value_name = "BASE")]
    pub name: Option<String>,

    /// Overwrite existing files.
    #[arg(long = "force")]
    pub force: bool,

    /// Omit the UTF-8 byte order mark from CSV files.
    #[arg(long = "no-bom")]
    pub no_bom: bool,
}

#[derive(Args)]
pub struct CopyArgs {
    /// Delimited text file with a header row.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format (defaults to the configured format).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default settings file if it does not exist yet.
    #[arg(long = "init")]
    pub init: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
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
