use std::fmt::Write;

use crate::error::Result;
use crate::linter::Status;
use crate::rules::{Issue, IssueType};

use super::{ColorMode, DocumentReport, OutputFormatter, Summary, ansi};

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.use_colors_on_stdout(),
            verbose: 0,
        }
    }

    /// At `-v` and above, issue explanations are printed too.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    const fn issue_icon(issue: &Issue) -> &'static str {
        match issue.issue_type {
            IssueType::Error => "✗",
            IssueType::Warning => "⚠",
        }
    }

    const fn status_color(status: Status) -> &'static str {
        match status {
            Status::Errors => ansi::RED,
            Status::Warnings => ansi::YELLOW,
            Status::Clean => ansi::GREEN,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_document(&self, entry: &DocumentReport, output: &mut String) {
        let score = &entry.report.score;
        let status = self.colorize(score.status.as_str(), Self::status_color(score.status));
        let _ = writeln!(output, "{}", entry.source);
        let _ = writeln!(output, "   Score: {}/100 ({status})", score.total);

        for (rule, rule_score) in score.breakdown.iter() {
            let _ = writeln!(
                output,
                "   {:<24}{:>5.1}/{:<3} {} issue(s)",
                rule.title(),
                rule_score.score,
                rule_score.max,
                rule_score.issues
            );
        }

        if !entry.report.issues.is_empty() {
            let _ = writeln!(output);
        }
        for issue in &entry.report.issues {
            self.format_issue(issue, output);
        }

        if !score.top_fixes.is_empty() {
            let _ = writeln!(output, "\n   Top fixes:");
            for (rank, fix) in score.top_fixes.iter().enumerate() {
                let _ = writeln!(output, "     {}. (+{:.1}) {}", rank + 1, fix.impact, fix.fix);
                if !fix.suggestion.is_empty() {
                    let _ = writeln!(output, "        → {}", fix.suggestion);
                }
            }
        }
    }

    fn format_issue(&self, issue: &Issue, output: &mut String) {
        let color = if issue.is_error() { ansi::RED } else { ansi::YELLOW };
        let icon = self.colorize(Self::issue_icon(issue), color);
        let _ = writeln!(output, "   {icon} [{}] {}", issue.rule.slug(), issue.message);

        if self.verbose >= 1 && !issue.explanation.is_empty() {
            let _ = writeln!(output, "     {}", issue.explanation);
        }
        if !issue.fix.suggestion.is_empty() {
            let _ = writeln!(output, "     fix: {}", issue.fix.suggestion);
        }
        if self.verbose >= 1
            && let Some(instructions) = &issue.fix.instructions
        {
            let _ = writeln!(output, "     how: {instructions}");
        }
        let _ = writeln!(output, "     impact: {:.1}", issue.score_impact);
    }

    fn format_summary(&self, summary: &Summary) -> String {
        let clean = self.colorize(&summary.clean.to_string(), ansi::GREEN);
        let warnings = self.colorize(&summary.warnings.to_string(), ansi::YELLOW);
        let errors = self.colorize(&summary.errors.to_string(), ansi::RED);
        format!(
            "Summary: {} documents checked, {clean} clean, {warnings} with warnings, {errors} with errors (average score {:.1})",
            summary.documents, summary.average_score
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[DocumentReport]) -> Result<String> {
        let mut output = String::new();
        for entry in reports {
            self.format_document(entry, &mut output);
            let _ = writeln!(output);
        }
        let summary = self.format_summary(&Summary::from_reports(reports));
        let _ = writeln!(output, "{summary}");
        Ok(output)
    }
}

#[cfg(test)]
impl TextFormatter {
    pub(crate) const fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            verbose: 0,
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
