use serde::Serialize;

use crate::document::DocumentMetadata;
use crate::error::Result;
use crate::rules::Issue;
use crate::scorer::Score;

use super::{DocumentReport, OutputFormatter, Summary};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    documents: Vec<JsonDocument<'a>>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    source: &'a str,
    score: &'a Score,
    issues: &'a [Issue],
    document: &'a DocumentMetadata,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[DocumentReport]) -> Result<String> {
        let output = JsonOutput {
            documents: reports
                .iter()
                .map(|entry| JsonDocument {
                    source: &entry.source,
                    score: &entry.report.score,
                    issues: &entry.report.issues,
                    document: &entry.report.document.metadata,
                })
                .collect(),
            summary: Summary::from_reports(reports),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
