//! Runs every rule over a parsed document and merges the results.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::document::{Content, Document, DocumentParser, extract_entities};
use crate::error::Result;
use crate::facts::{Fact, FactsInput};
use crate::rules::{Issue, IssueType, Rule, RuleContext};
use crate::scorer::Score;
use crate::vocabulary::CompiledVocabulary;

/// Overall verdict for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// At least one blocking error.
    Errors,
    Warnings,
    Clean,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Errors => "errors",
            Self::Warnings => "warnings",
            Self::Clean => "clean",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities named in the title, the answer box and the first regular
/// section, in first-seen order.
#[must_use]
pub fn document_entities<S: AsRef<str>>(document: &Document, stop_words: &[S]) -> Vec<String> {
    let sources = std::iter::once(document.title.as_str())
        .chain(document.answer_box().map(|s| s.text.as_str()))
        .chain(document.first_regular_section().map(|s| s.text.as_str()));

    let entities: IndexSet<String> = sources
        .flat_map(|text| extract_entities(text, stop_words))
        .collect();
    entities.into_iter().collect()
}

/// Everything one analysis produces.
#[derive(Debug, Clone)]
pub struct Report {
    pub document: Document,
    pub key_facts: Vec<Fact>,
    pub issues: Vec<Issue>,
    pub score: Score,
}

pub struct Linter {
    vocabulary: CompiledVocabulary,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(CompiledVocabulary::default())
    }
}

impl Linter {
    #[must_use]
    pub const fn new(vocabulary: CompiledVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Build a linter from the `[vocabulary]` section of a loaded config.
    ///
    /// # Errors
    /// Returns an error if an overridden vague-claim pattern is not a valid regex.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.vocabulary.clone().compile()?))
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &CompiledVocabulary {
        &self.vocabulary
    }

    #[must_use]
    pub fn entities(&self, document: &Document) -> Vec<String> {
        document_entities(document, &self.vocabulary.tables.entity_stop_words)
    }

    /// Run all six rules. Checkers run in parallel; the merged list follows
    /// [`Rule::ALL`] order, then each rule's own section/paragraph order.
    #[must_use]
    pub fn lint(&self, document: &Document, key_facts: &[Fact]) -> Vec<Issue> {
        let entities = self.entities(document);
        let ctx = self.context(document, key_facts, &entities);

        let per_rule: Vec<Vec<Issue>> = Rule::ALL
            .par_iter()
            .map(|rule| rule.checker().check(&ctx))
            .collect();

        for (rule, issues) in Rule::ALL.iter().zip(&per_rule) {
            tracing::debug!(rule = rule.name(), issues = issues.len(), "rule checked");
        }
        per_rule.into_iter().flatten().collect()
    }

    /// Parse, lint and score one piece of content.
    ///
    /// Without an explicit `facts` list the key facts are attached to the
    /// document as its extracted facts.
    #[must_use]
    pub fn analyze(&self, content: &Content, top_fixes: usize) -> Report {
        let key_facts = content
            .key_facts
            .clone()
            .map(FactsInput::into_facts)
            .unwrap_or_default();
        let facts = content
            .facts
            .clone()
            .map_or_else(|| key_facts.clone(), FactsInput::into_facts);

        let parser = DocumentParser::new(self.vocabulary.tables.summary_marker.clone());
        let document = parser.parse(content).with_facts(facts);
        let issues = self.lint(&document, &key_facts);
        let score = self.score(&document, &issues, &key_facts, top_fixes);

        Report {
            document,
            key_facts,
            issues,
            score,
        }
    }

    #[must_use]
    pub const fn context<'a>(
        &'a self,
        document: &'a Document,
        key_facts: &'a [Fact],
        entities: &'a [String],
    ) -> RuleContext<'a> {
        RuleContext {
            document,
            key_facts,
            entities,
            vocabulary: &self.vocabulary,
        }
    }
}

/// Lint with the built-in vocabulary.
#[must_use]
pub fn run_linter(document: &Document, key_facts: &[Fact]) -> Vec<Issue> {
    Linter::default().lint(document, key_facts)
}

/// Issues keyed by rule; every rule has an entry, in [`Rule::ALL`] order.
#[must_use]
pub fn group_issues_by_rule(issues: &[Issue]) -> IndexMap<Rule, Vec<&Issue>> {
    let mut grouped: IndexMap<Rule, Vec<&Issue>> =
        Rule::ALL.iter().map(|rule| (*rule, Vec::new())).collect();
    for issue in issues {
        grouped.entry(issue.rule).or_default().push(issue);
    }
    grouped
}

#[must_use]
pub fn blocking_issues(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|issue| issue.is_blocking()).collect()
}

#[must_use]
pub fn determine_status(issues: &[Issue]) -> Status {
    if issues.iter().any(Issue::is_blocking) {
        Status::Errors
    } else if issues.iter().any(|issue| issue.issue_type == IssueType::Warning) {
        Status::Warnings
    } else {
        Status::Clean
    }
}

#[cfg(test)]
#[path = "linter_tests.rs"]
mod tests;
