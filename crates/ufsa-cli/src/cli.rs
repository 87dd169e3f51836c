//! CLI argument definitions for the UFSA pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Output directory used when `--output-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "build";

#[derive(Parser)]
#[command(
    name = "ufsa",
    version,
    about = "UFSA - Normalize heterogeneous standards into a concept graph",
    long_about = "Ingest standards specifications (CSV vocabularies, JSON Schemas, \
                  RDF/SKOS graphs, SQL DDL, CycloneDX SBOMs) listed in a registry,\n\
                  normalize them into concept schemes and emit JSON/CSV artifacts."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the ingestion, unification and emission pipeline.
    Run(RunArgs),

    /// Compare tracked file hashes against the filesystem.
    Verify(VerifyArgs),

    /// List registry entries and the parser each one resolves to.
    Standards(StandardsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the standards registry YAML.
    #[arg(long = "registry", value_name = "PATH")]
    pub registry: PathBuf,

    /// Root for `fixtures://` locators (default: $UFSA_FIXTURES_DIR or data/fixtures).
    #[arg(long = "fixtures-dir", value_name = "DIR")]
    pub fixtures_dir: Option<PathBuf>,

    /// Output directory for generated artifacts.
    #[arg(
        long = "output-dir",
        visible_alias = "out",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,

    /// Tracker ledger path (default: <OUTPUT_DIR>/tracker.json).
    #[arg(long = "tracker", value_name = "PATH")]
    pub tracker: Option<PathBuf>,

    /// Print a JSON summary instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct VerifyArgs {
    /// Tracker ledger to verify.
    #[arg(long = "tracker", value_name = "PATH", default_value = "build/tracker.json")]
    pub tracker: PathBuf,

    /// Print mismatches as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct StandardsArgs {
    /// Path to the standards registry YAML.
    #[arg(long = "registry", value_name = "PATH")]
    pub registry: PathBuf,
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
