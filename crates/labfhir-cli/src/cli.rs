//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use labfhir_model::{DerivationPolicy, RuleSet};

#[derive(Parser)]
#[command(
    name = "labfhir",
    version,
    about = "Convert lab report text to FHIR bundles",
    long_about = "Convert OCR text of clinical lab reports into FHIR R4 collection bundles\n\
                  (Patient, DiagnosticReport, Observations) and check conversions\n\
                  against stored baselines."
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

    /// Log patient names instead of redacting them.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a report text file into a bundle.
    Extract(ExtractArgs),

    /// Convert structured fields or a language-model completion.
    Import(ImportArgs),

    /// Run a converter over test inputs and compare against baselines.
    RunTests(RunTestsArgs),

    /// List the recognized lab measurements.
    Patterns,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Report text file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Recognition rules.
    #[arg(long = "rules", value_enum)]
    pub rules: Option<RuleSetArg>,

    /// Whether birth and report dates may be derived when absent.
    #[arg(long = "derivation", value_enum)]
    pub derivation: Option<DerivationArg>,

    /// Output name suffix (default: the executable name).
    #[arg(long = "output-suffix", value_name = "SUFFIX")]
    pub output_suffix: Option<String>,

    /// Print the bundle instead of writing `<INPUT>-<suffix>.json`.
    #[arg(long = "stdout")]
    pub stdout: bool,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Structured field JSON, or completion text with `--completion`.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Treat the input as a language-model completion holding a bundle.
    #[arg(long = "completion")]
    pub completion: bool,

    /// Output name suffix (default: the executable name).
    #[arg(long = "output-suffix", value_name = "SUFFIX")]
    pub output_suffix: Option<String>,

    /// Print the document instead of writing it next to the input.
    #[arg(long = "stdout")]
    pub stdout: bool,
}

#[derive(Parser)]
pub struct RunTestsArgs {
    /// Converter executable, run as `<PROGRAM> [ARG...] <input>`.
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    /// Directory searched recursively for `*.txt` inputs.
    #[arg(value_name = "TEST_ROOT")]
    pub test_root: PathBuf,

    /// Relative input path, or a wildcard such as `user-1/*.txt`.
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// File of dotted field paths to compare, one per line.
    #[arg(value_name = "FIELD_FILE")]
    pub field_file: Option<PathBuf>,

    /// Overwrite baselines with fresh outputs instead of verifying.
    #[arg(long = "baseline")]
    pub baseline: bool,

    /// Argument passed to the program before the input path (repeatable).
    #[arg(long = "program-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub program_args: Vec<String>,

    /// Output name suffix (default: the program's file stem).
    #[arg(long = "output-suffix", value_name = "SUFFIX")]
    pub output_suffix: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RuleSetArg {
    Strict,
    Permissive,
}

impl From<RuleSetArg> for RuleSet {
    fn from(arg: RuleSetArg) -> Self {
        match arg {
            RuleSetArg::Strict => RuleSet::Strict,
            RuleSetArg::Permissive => RuleSet::Permissive,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DerivationArg {
    Never,
    Legacy,
}

impl From<DerivationArg> for DerivationPolicy {
    fn from(arg: DerivationArg) -> Self {
        match arg {
            DerivationArg::Never => DerivationPolicy::Never,
            DerivationArg::Legacy => DerivationPolicy::Legacy,
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
