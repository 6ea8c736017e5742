//! CLI argument definitions using clap.
//!
//! A single command whose mode is picked by flags: `--audit` scans sources for
//! key usage, `--translate from-to` machine-translates every value, and with
//! neither the input is converted to the `--to` format.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::codecs::Format;
use crate::config::SearcherKind;

#[derive(Debug, Parser)]
#[command(
    name = "i18n-audit",
    author,
    version,
    about = "Convert i18n JSON <-> CSV, detect unused and undefined translations, and translate between languages.",
    long_about = None
)]
pub struct Arguments {
    /// Input file (.json or .csv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub to: OutputFormat,

    /// Translate using source-target languages (e.g. en-tr)
    #[arg(short, long, value_name = "FROM-TO")]
    pub translate: Option<String>,

    /// Audit for undefined and unused keys in the translation file
    #[arg(long)]
    pub audit: bool,

    /// Source code directory to scan for used keys (repeatable, overrides config file)
    #[arg(long, value_name = "DIR")]
    pub src: Vec<PathBuf>,

    /// Glob of files to skip while scanning (repeatable, added to config file)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Also match any quoted string that names a key
    #[arg(long)]
    pub loose: bool,

    /// Leave the file:line:column column empty
    #[arg(long)]
    pub no_source: bool,

    /// Leave out keys that are used but missing from the translation file
    #[arg(long)]
    pub no_attention: bool,

    /// Text search implementation (overrides config file)
    #[arg(long, value_enum)]
    pub searcher: Option<SearcherKind>,

    /// Translation API endpoint (LibreTranslate)
    #[arg(long, env = "I18N_AUDIT_API_URL")]
    pub api_url: Option<String>,

    /// API key for the translation service
    #[arg(long, env = "I18N_AUDIT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Number of entries per translation request
    #[arg(long, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Delay after each translation request, in milliseconds
    #[arg(long, allow_negative_numbers = true, value_name = "MS")]
    pub chunk_delay: Option<i64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
    Html,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Format::Csv,
            OutputFormat::Json => Format::Json,
            OutputFormat::Html => Format::Html,
        }
    }
}
