//! Shared fixtures for the rule tests.

use crate::document::{Content, Document, parse_document};
use crate::facts::Fact;
use crate::linter::document_entities;
use crate::vocabulary::CompiledVocabulary;

use super::{Issue, Rule, RuleContext, RuleScore};

/// A parsed document plus everything a [`RuleContext`] borrows.
pub struct Fixture {
    pub document: Document,
    pub key_facts: Vec<Fact>,
    pub entities: Vec<String>,
    pub vocabulary: CompiledVocabulary,
}

impl Fixture {
    pub fn new(content: &Content) -> Self {
        let vocabulary = CompiledVocabulary::default();
        let document = parse_document(content);
        let entities = document_entities(&document, &vocabulary.tables.entity_stop_words);
        Self {
            document,
            key_facts: Vec::new(),
            entities,
            vocabulary,
        }
    }

    pub fn with_key_facts(mut self, key_facts: Vec<Fact>) -> Self {
        self.key_facts = key_facts;
        self
    }

    pub fn with_facts(mut self, facts: Vec<Fact>) -> Self {
        self.document.facts = facts;
        self
    }

    pub fn ctx(&self) -> RuleContext<'_> {
        RuleContext {
            document: &self.document,
            key_facts: &self.key_facts,
            entities: &self.entities,
            vocabulary: &self.vocabulary,
        }
    }

    pub fn check(&self, rule: Rule) -> Vec<Issue> {
        rule.checker().check(&self.ctx())
    }

    /// Run `rule` and score it against its own issues.
    pub fn score(&self, rule: Rule) -> RuleScore {
        let issues = self.check(rule);
        rule.checker().score(&self.ctx(), &issues)
    }
}

/// `count` space-separated repetitions of `word`.
pub fn repeat_words(word: &str, count: usize) -> String {
    vec![word; count].join(" ")
}

pub fn ids(issues: &[Issue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.id.as_str()).collect()
}
