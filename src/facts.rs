//! Subject-predicate-object facts.
//!
//! Facts arrive either as pipe-delimited lines (`Subject | Predicate | Object`)
//! or as structured objects. Both shapes are normalized here into [`Fact`]
//! before any rule sees them.

use serde::{Deserialize, Serialize};

use crate::document::text::truncate_chars;

/// Canonical fact shape consumed by the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounded: Option<bool>,
}

impl Fact {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence_text = Some(evidence.into());
        self
    }

    #[must_use]
    pub fn with_source_section(mut self, section_id: impl Into<String>) -> Self {
        self.source_section_id = Some(section_id.into());
        self
    }

    #[must_use]
    pub const fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = Some(grounded);
        self
    }

    /// `"subject predicate object"`, cut to 60 characters for messages.
    #[must_use]
    pub fn summary(&self) -> String {
        let joined = format!("{} {} {}", self.subject, self.predicate, self.object);
        truncate_chars(&joined, 60)
    }

    #[must_use]
    pub const fn has_evidence(&self) -> bool {
        self.evidence_text.is_some() || self.source_section_id.is_some()
    }

    /// Parse a single `Subject | Predicate | Object` line.
    ///
    /// Missing trailing parts become empty strings; returns `None` when the
    /// line carries no `|` separator at all.
    #[must_use]
    pub fn from_line(id: impl Into<String>, line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || !line.contains('|') {
            return None;
        }
        let mut parts = line.split('|').map(str::trim);
        let subject = parts.next().unwrap_or_default();
        let predicate = parts.next().unwrap_or_default();
        let object = parts.next().unwrap_or_default();
        Some(Self::new(id, subject, predicate, object))
    }
}

/// Parse newline-delimited `Subject | Predicate | Object` lines.
///
/// Blank lines and lines without `|` are skipped; ids are `fact-{n}` over the
/// kept lines.
#[must_use]
pub fn parse_fact_lines(text: &str) -> Vec<Fact> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let keep = line.contains('|');
            if !keep {
                tracing::warn!("ignoring fact line without '|' separators: {line}");
            }
            keep
        })
        .enumerate()
        .filter_map(|(idx, line)| Fact::from_line(format!("fact-{idx}"), line))
        .collect()
}

/// A structured fact as supplied by a caller; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFact {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "entity")]
    pub subject: Option<String>,
    #[serde(default, alias = "relation")]
    pub predicate: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub evidence_text: Option<String>,
    #[serde(default)]
    pub source_section_id: Option<String>,
    #[serde(default)]
    pub grounded: Option<bool>,
}

/// One entry of a fact list: a pipe-delimited string or a structured object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FactInput {
    Line(String),
    Structured(RawFact),
}

/// A whole fact list: newline-delimited text or an array of entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FactsInput {
    Lines(String),
    List(Vec<FactInput>),
}

impl Default for FactsInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FactInput {
    /// Normalize into a [`Fact`], using `fact-{index}` when no id is given.
    #[must_use]
    pub fn into_fact(self, index: usize) -> Fact {
        let fallback_id = format!("fact-{index}");
        match self {
            Self::Line(line) => Fact::from_line(fallback_id.clone(), &line)
                .unwrap_or_else(|| Fact::new(fallback_id, line.trim(), "", "")),
            Self::Structured(raw) => Fact {
                id: non_empty(raw.id).unwrap_or(fallback_id),
                subject: raw.subject.unwrap_or_default(),
                predicate: raw.predicate.unwrap_or_default(),
                object: raw.object.unwrap_or_default(),
                object_type: non_empty(raw.object_type),
                evidence_text: non_empty(raw.evidence_text),
                source_section_id: non_empty(raw.source_section_id),
                grounded: raw.grounded,
            },
        }
    }
}

impl FactsInput {
    #[must_use]
    pub fn into_facts(self) -> Vec<Fact> {
        match self {
            Self::Lines(text) => parse_fact_lines(&text),
            Self::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| item.into_fact(idx))
                .collect(),
        }
    }

    /// Parse a fact file: a JSON array/string when it looks like JSON, pipe lines otherwise.
    ///
    /// # Errors
    /// Returns an error if the text looks like JSON but does not parse.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let trimmed = text.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('"') {
            Ok(serde_json::from_str(trimmed)?)
        } else {
            Ok(Self::Lines(text.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "facts_tests.rs"]
mod tests;
