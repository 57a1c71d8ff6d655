//! CLI argument definitions for `tabmap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabmap_cli::pipeline::ColumnOverride;

#[derive(Parser)]
#[command(
    name = "tabmap",
    version,
    about = "Map spreadsheet columns onto a template and emit normalized rows",
    long_about = "Import a CSV, TSV, XLS or XLSX file against a column template.\n\n\
                  Columns are matched to template keys by alias and fuzzy name \
                  matching, adjusted with --map and --exclude, validated for \
                  required columns and written out as JSON."
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

    /// Log output format.
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
    /// Import a file and write the mapped rows as JSON.
    Import(ImportArgs),

    /// Show the leading rows of a file for picking the header row.
    Preview(PreviewArgs),

    /// Print the header line of a blank CSV for a template.
    Template(TemplateArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// File to import (.csv, .tsv, .xls or .xlsx).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Template as inline JSON or a path to a JSON file.
    #[arg(long = "template", value_name = "JSON|PATH")]
    pub template: Option<String>,

    /// Importer configuration file (template and session options).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Zero-based row holding the column names (default: 0).
    #[arg(long = "header-row", value_name = "N", conflicts_with = "detect_header")]
    pub header_row: Option<usize>,

    /// Guess the header row from the leading rows.
    #[arg(long = "detect-header")]
    pub detect_header: bool,

    /// Use row 0 as the header without a header-selection step.
    #[arg(long = "skip-header-selection")]
    pub skip_header_selection: bool,

    /// Map a source column (name or index) onto a template key; repeatable.
    /// An empty key clears the column's mapping.
    #[arg(long = "map", value_name = "COL=KEY")]
    pub map: Vec<ColumnOverride>,

    /// Leave a source column (name or index) out of the result; repeatable.
    #[arg(long = "exclude", value_name = "COL")]
    pub exclude: Vec<String>,

    /// Write the result JSON here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Message language.
    #[arg(long = "language", value_name = "LANG")]
    pub language: Option<String>,

    /// Similarity measure for fuzzy column suggestions.
    #[arg(long = "similarity", value_enum)]
    pub similarity: Option<SimilarityArg>,

    /// Pretty-print the result JSON.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// File to preview.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Importer configuration file (JSON), for its language and messages.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Message language.
    #[arg(long = "language", value_name = "LANG")]
    pub language: Option<String>,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Template as inline JSON or a path to a JSON file.
    #[arg(value_name = "JSON|PATH")]
    pub template: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SimilarityArg {
    BigramDice,
    JaroWinkler,
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
