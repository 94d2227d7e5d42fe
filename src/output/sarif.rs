use serde::Serialize;

use crate::error::Result;
use crate::rules::{Issue, Rule};

use super::{DocumentReport, OutputFormatter};

/// SARIF 2.1.0 output formatter for GitHub Code Scanning and other CI/CD tools.
pub struct SarifFormatter;

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "croutonizer";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool {
    driver: ToolDriver,
}

#[derive(Serialize)]
struct ToolDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: &'static str,
    name: &'static str,
    short_description: MultiformatMessageString,
    full_description: MultiformatMessageString,
    default_configuration: ReportingConfiguration,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct MultiformatMessageString {
    text: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: &'static str,
    rule_index: usize,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
    properties: ResultProperties,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    logical_locations: Vec<LogicalLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
    uri_base_id: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogicalLocation {
    name: String,
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultProperties {
    issue_id: String,
    score_impact: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    suggestion: String,
}

/// SARIF level: blocking errors fail the run, other errors warn, warnings are notes.
const fn level(issue: &Issue) -> &'static str {
    if issue.is_blocking() {
        "error"
    } else if issue.is_error() {
        "warning"
    } else {
        "note"
    }
}

const fn rule_index(rule: Rule) -> usize {
    rule as usize
}

impl SarifFormatter {
    fn build_rules() -> Vec<ReportingDescriptor> {
        Rule::ALL
            .into_iter()
            .map(|rule| ReportingDescriptor {
                id: rule.slug(),
                name: rule.name(),
                short_description: MultiformatMessageString { text: rule.title() },
                full_description: MultiformatMessageString {
                    text: rule.description(),
                },
                default_configuration: ReportingConfiguration { level: "warning" },
            })
            .collect()
    }

    fn convert_issue(source: &str, issue: &Issue) -> SarifResult {
        let logical_locations = issue
            .location
            .section_id
            .iter()
            .map(|id| LogicalLocation {
                name: id.clone(),
                kind: "section",
            })
            .chain(issue.location.fact_id.iter().map(|id| LogicalLocation {
                name: id.clone(),
                kind: "fact",
            }))
            .collect();

        SarifResult {
            rule_id: issue.rule.slug(),
            rule_index: rule_index(issue.rule),
            level: level(issue),
            message: Message {
                text: issue.message.clone(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        // URIs always use forward slashes
                        uri: source.replace('\\', "/"),
                        uri_base_id: "%SRCROOT%",
                    },
                },
                logical_locations,
            }],
            properties: ResultProperties {
                issue_id: issue.id.clone(),
                score_impact: issue.score_impact,
                suggestion: issue.fix.suggestion.clone(),
            },
        }
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, reports: &[DocumentReport]) -> Result<String> {
        let results = reports
            .iter()
            .flat_map(|entry| {
                entry
                    .report
                    .issues
                    .iter()
                    .map(|issue| Self::convert_issue(&entry.source, issue))
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules: Self::build_rules(),
                    },
                },
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
