use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Output format for `explain`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExplainFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "croutonizer")]
#[command(author, version, about = "Lint structured articles for citation readiness and score them 0-100")]
#[command(long_about = "Checks article content against six editorial rules (section anchoring, \
    entity persistence, claim-evidence mapping, header specificity, fact density and fact quality) \
    and reports located issues with fixes plus a 0-100 score.\n\n\
    Exit codes:\n  \
    0 - No blocking issues\n  \
    1 - Blocking issues, strict-mode warnings, or score below --fail-below\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint and score content files
    Check(CheckArgs),

    /// Describe each rule's budget, thresholds and penalties
    Explain(ExplainArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON content files (title, answerBox, sections, keyFacts)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Key facts file, one "Subject | Predicate | Object" per line (overrides each file's keyFacts)
    #[arg(long)]
    pub key_facts: Option<PathBuf>,

    /// Extracted facts file: pipe-delimited lines or a JSON array
    #[arg(long)]
    pub facts: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json, sarif, markdown]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat warnings as failures (exit code 1)
    #[arg(long)]
    pub strict: bool,

    /// Only report, never fail on issues
    #[arg(long)]
    pub warn_only: bool,

    /// Fail when any document scores below this total
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_below: Option<u8>,

    /// Number of top fixes to include per document (overrides config)
    #[arg(long)]
    pub top_fixes: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Rule to explain, e.g. fact-density or factDensity (default: all rules)
    pub rule: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ExplainFormat,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".croutonizer.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
