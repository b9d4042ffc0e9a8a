//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Largest accepted `--skill-baseline`.
pub const MAX_SKILL_BASELINE: u64 = 10_000;

#[derive(Parser)]
#[command(
    name = "cpass",
    version,
    about = "CPASS - map farm worker uploads to a skill taxonomy",
    long_about = "Map uploaded farm worker sheets onto the CPASS skill taxonomy.\n\n\
                  Detects column roles, matches free-text task descriptions to skills,\n\
                  scores certification readiness and reports certification coverage."
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

    /// Allow worker names and task text in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Read the taxonomy CSV files from this directory instead of the
    /// embedded copy.
    #[arg(
        long = "taxonomy-dir",
        value_name = "DIR",
        env = "CPASS_TAXONOMY_DIR",
        global = true
    )]
    pub taxonomy_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List taxonomy skills.
    Taxonomy(TaxonomyArgs),

    /// Show detected column roles for an upload.
    Columns(ColumnsArgs),

    /// Split free text into fragments and match each to a skill.
    Match(MatchArgs),

    /// Run the full onboarding pipeline over an upload.
    Onboard(OnboardArgs),

    /// Report certification and occupation coverage for a set of skills.
    Certify(CertifyArgs),

    /// Check the taxonomy for references to undefined skills.
    Doctor,
}

#[derive(Args)]
pub struct TaxonomyArgs {
    /// Print counts instead of the skill list.
    #[arg(long)]
    pub stats: bool,

    /// Only list skills in this domain (e.g. livestock).
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Upload to inspect.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Column override, repeatable (e.g. --map "Kazi=task_description").
    #[arg(long = "map", value_name = "COLUMN=FIELD")]
    pub overrides: Vec<String>,
}

#[derive(Args)]
pub struct MatchArgs {
    /// Free text, e.g. "Weeding the maize plot, then watering seedlings".
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Matching thresholds shared by `match` and `onboard`.
#[derive(Args, Clone, Copy)]
pub struct ThresholdArgs {
    /// Minimum similarity for a fragment to match at all.
    #[arg(long = "min-similarity", value_name = "SCORE", default_value_t = 0.40)]
    pub min_similarity: f32,

    /// Confidence weight applied to skill synonym matches.
    #[arg(long = "synonym-weight", value_name = "WEIGHT", default_value_t = 0.85)]
    pub synonym_weight: f32,
}

#[derive(Args)]
pub struct OnboardArgs {
    /// Upload to onboard.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Column override, repeatable (e.g. --map "Kazi=task_description").
    #[arg(long = "map", value_name = "COLUMN=FIELD")]
    pub overrides: Vec<String>,

    /// Batch identifier (default: derived from the file name).
    #[arg(long = "batch-id", value_name = "ID")]
    pub batch_id: Option<String>,

    /// Save the onboarded batch to this directory.
    #[arg(long = "store-dir", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Load and save the reviewed column mapping in this directory.
    #[arg(long = "mapping-dir", value_name = "DIR")]
    pub mapping_dir: Option<PathBuf>,

    /// Stop after this many rows.
    #[arg(long, value_name = "ROWS")]
    pub limit: Option<usize>,

    /// Distinct skills that count as full certification readiness.
    #[arg(
        long = "skill-baseline",
        value_name = "COUNT",
        default_value_t = 12,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_SKILL_BASELINE)
    )]
    pub skill_baseline: usize,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Print the report as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CertifyArgs {
    /// Skill ids the worker holds (comma-separated).
    #[arg(long, value_name = "ID,...", value_delimiter = ',', required = true)]
    pub skills: Vec<String>,

    /// Self rating per skill on a 1-10 scale, in the order of --skills.
    #[arg(
        long,
        value_name = "N,...",
        value_delimiter = ',',
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    pub ratings: Vec<u8>,

    /// Print the report as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
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
