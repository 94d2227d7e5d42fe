mod error_output;
mod json;
mod markdown;
mod sarif;
mod text;

pub use error_output::ErrorOutput;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use sarif::SarifFormatter;
pub use text::TextFormatter;

use std::io::IsTerminal;

use serde::Serialize;

use crate::error::Result;
use crate::linter::{Report, Status};

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if the stream is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against a concrete stream's TTY state.
    #[must_use]
    pub fn use_colors(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            // Presence of NO_COLOR (any value) disables color, see https://no-color.org
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && is_terminal,
        }
    }

    #[must_use]
    pub fn use_colors_on_stdout(self) -> bool {
        self.use_colors(std::io::stdout().is_terminal())
    }

    #[must_use]
    pub fn use_colors_on_stderr(self) -> bool {
        self.use_colors(std::io::stderr().is_terminal())
    }
}

/// One analysed input and the name it was read from.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub source: String,
    pub report: Report,
}

impl DocumentReport {
    #[must_use]
    pub fn new(source: impl Into<String>, report: Report) -> Self {
        Self {
            source: source.into(),
            report,
        }
    }
}

/// Trait for formatting analysis reports into various output formats.
pub trait OutputFormatter {
    /// Format the reports into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, reports: &[DocumentReport]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
    Markdown,
}

impl OutputFormat {
    /// Formatter for this format. Only text output is colored.
    #[must_use]
    pub fn formatter(self, color: ColorMode, verbose: u8) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(color).with_verbose(verbose)),
            Self::Json => Box::new(JsonFormatter),
            Self::Sarif => Box::new(SarifFormatter),
            Self::Markdown => Box::new(MarkdownFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Totals across every document of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub documents: usize,
    pub clean: usize,
    pub warnings: usize,
    pub errors: usize,
    pub blocking_issues: usize,
    /// Mean total score, one decimal place.
    pub average_score: f64,
}

impl Summary {
    #[must_use]
    pub fn from_reports(reports: &[DocumentReport]) -> Self {
        let mut summary = Self {
            documents: reports.len(),
            clean: 0,
            warnings: 0,
            errors: 0,
            blocking_issues: 0,
            average_score: 0.0,
        };
        let mut total = 0.0;
        for DocumentReport { report, .. } in reports {
            match report.score.status {
                Status::Clean => summary.clean += 1,
                Status::Warnings => summary.warnings += 1,
                Status::Errors => summary.errors += 1,
            }
            summary.blocking_issues += report.score.blocking_issues;
            total += f64::from(report.score.total);
        }
        if !reports.is_empty() {
            let mean = total / crate::rules::as_f64(reports.len());
            summary.average_score = (mean * 10.0).round() / 10.0;
        }
        summary
    }
}

/// Escape `|` and line breaks so text fits in one Markdown table cell.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
