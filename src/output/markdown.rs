use std::fmt::Write;

use crate::error::Result;
use crate::linter::Status;

use super::{DocumentReport, OutputFormatter, Summary, table_cell};

pub struct MarkdownFormatter;

impl MarkdownFormatter {
    const fn status_icon(status: Status) -> &'static str {
        match status {
            Status::Clean => "✅",
            Status::Warnings => "⚠️",
            Status::Errors => "❌",
        }
    }

    fn format_summary(reports: &[DocumentReport], output: &mut String) {
        let summary = Summary::from_reports(reports);
        let _ = writeln!(output, "## Croutonizer Report\n");
        let _ = writeln!(output, "| Metric | Value |");
        let _ = writeln!(output, "|--------|-------|");
        let _ = writeln!(output, "| Documents | {} |", summary.documents);
        let _ = writeln!(output, "| ✅ Clean | {} |", summary.clean);
        let _ = writeln!(output, "| ⚠️ Warnings | {} |", summary.warnings);
        let _ = writeln!(output, "| ❌ Errors | {} |", summary.errors);
        let _ = writeln!(output, "| Blocking issues | {} |", summary.blocking_issues);
        let _ = writeln!(output, "| Average score | {:.1} |", summary.average_score);
    }

    fn format_document(entry: &DocumentReport, output: &mut String) {
        let score = &entry.report.score;
        let _ = writeln!(
            output,
            "\n### {} {} ({}/100)\n",
            Self::status_icon(score.status),
            table_cell(&entry.source),
            score.total
        );

        let _ = writeln!(output, "| Rule | Score | Max | Issues |");
        let _ = writeln!(output, "|------|------:|----:|-------:|");
        for (rule, rule_score) in score.breakdown.iter() {
            let _ = writeln!(
                output,
                "| {} | {:.1} | {} | {} |",
                rule.title(),
                rule_score.score,
                rule_score.max,
                rule_score.issues
            );
        }

        if entry.report.issues.is_empty() {
            return;
        }
        let _ = writeln!(output, "\n#### Issues\n");
        let _ = writeln!(output, "| Type | Rule | Message | Fix | Impact |");
        let _ = writeln!(output, "|------|------|---------|-----|-------:|");
        for issue in &entry.report.issues {
            let icon = if issue.is_error() { "❌" } else { "⚠️" };
            let _ = writeln!(
                output,
                "| {icon} {} | {} | {} | {} | {:.1} |",
                issue.issue_type.as_str(),
                issue.rule.slug(),
                table_cell(&issue.message),
                table_cell(&issue.fix.suggestion),
                issue.score_impact
            );
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, reports: &[DocumentReport]) -> Result<String> {
        let mut output = String::new();
        Self::format_summary(reports, &mut output);
        for entry in reports {
            Self::format_document(entry, &mut output);
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
