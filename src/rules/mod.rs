//! The six editorial rules and the issue model they share.
//!
//! Each rule is a unit struct implementing [`RuleChecker`]: `check` walks the
//! document and returns that rule's own issue list, `score` re-derives the
//! rule's point allocation from the document and those issues.

mod claim_evidence;
mod entity_persistence;
mod explain;
mod fact_density;
mod fact_quality;
mod header_specificity;
mod section_anchoring;

pub use claim_evidence::{BRIDGING_DISTANCE_TOKENS, ClaimEvidence};
pub use entity_persistence::{EntityPersistence, LOOKBACK_TOKENS};
pub use explain::{Penalty, RuleExplanation, Threshold};
pub use fact_density::{DensityBand, FactDensity, IDEAL_DENSITY_MAX, IDEAL_DENSITY_MIN};
pub use fact_quality::FactQuality;
pub use header_specificity::HeaderSpecificity;
pub use section_anchoring::{SectionAnchoring, requires_anchor};

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::facts::Fact;
use crate::vocabulary::CompiledVocabulary;

/// Identifies one of the six rules. Declaration order is the merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    SectionAnchoring,
    EntityPersistence,
    ClaimEvidence,
    HeaderSpecificity,
    FactDensity,
    FactQuality,
}

impl Rule {
    pub const ALL: [Self; 6] = [
        Self::SectionAnchoring,
        Self::EntityPersistence,
        Self::ClaimEvidence,
        Self::HeaderSpecificity,
        Self::FactDensity,
        Self::FactQuality,
    ];

    /// The camelCase key used in issues and score breakdowns.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SectionAnchoring => "sectionAnchoring",
            Self::EntityPersistence => "entityPersistence",
            Self::ClaimEvidence => "claimEvidence",
            Self::HeaderSpecificity => "headerSpecificity",
            Self::FactDensity => "factDensity",
            Self::FactQuality => "factQuality",
        }
    }

    /// Kebab-case id, used as the SARIF rule id and on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SectionAnchoring => "section-anchoring",
            Self::EntityPersistence => "entity-persistence",
            Self::ClaimEvidence => "claim-evidence",
            Self::HeaderSpecificity => "header-specificity",
            Self::FactDensity => "fact-density",
            Self::FactQuality => "fact-quality",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SectionAnchoring => "Section Anchoring",
            Self::EntityPersistence => "Entity Persistence",
            Self::ClaimEvidence => "Claim-Evidence Mapping",
            Self::HeaderSpecificity => "Header Specificity",
            Self::FactDensity => "Fact Density",
            Self::FactQuality => "Fact Quality",
        }
    }

    /// Points this rule contributes to the 100-point total.
    #[must_use]
    pub const fn max_score(self) -> f64 {
        match self {
            Self::SectionAnchoring | Self::EntityPersistence | Self::ClaimEvidence => 20.0,
            Self::HeaderSpecificity | Self::FactDensity => 15.0,
            Self::FactQuality => 10.0,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SectionAnchoring => {
                "Sections over 700 tokens or 500 words must end with a short, pronoun-free summary."
            }
            Self::EntityPersistence => {
                "Paragraphs opening with a pronoun need a named entity in the preceding 150 tokens."
            }
            Self::ClaimEvidence => {
                "Every key fact must be supported by a section, close to where the claim is made."
            }
            Self::HeaderSpecificity => {
                "Headers should name a topic, a qualifier and an entity instead of generic labels."
            }
            Self::FactDensity => {
                "Content should carry 0.8 to 2.0 facts per 100 words without hedging or filler."
            }
            Self::FactQuality => {
                "Extracted facts need a complete, specific, grounded subject-predicate-object shape."
            }
        }
    }

    /// Look up a rule by camelCase name or kebab-case slug.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(name) || rule.slug() == name)
    }

    /// The checker that implements this rule.
    #[must_use]
    pub fn checker(self) -> &'static dyn RuleChecker {
        match self {
            Self::SectionAnchoring => &SectionAnchoring,
            Self::EntityPersistence => &EntityPersistence,
            Self::ClaimEvidence => &ClaimEvidence,
            Self::HeaderSpecificity => &HeaderSpecificity,
            Self::FactDensity => &FactDensity,
            Self::FactQuality => &FactQuality,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Warning,
}

impl IssueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Blocking,
    NonBlocking,
}

/// Where in the document an issue was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_index: Option<usize>,
    /// Byte range `[start, end)` within the section text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_range: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fact_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl Location {
    /// Document-level location.
    #[must_use]
    pub fn document() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn section(section_id: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn paragraph(section_id: impl Into<String>, paragraph_index: usize) -> Self {
        Self {
            section_id: Some(section_id.into()),
            paragraph_index: Some(paragraph_index),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fact(fact_index: usize) -> Self {
        Self {
            fact_index: Some(fact_index),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_char_range(mut self, start: usize, end: usize) -> Self {
        self.char_range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_fact_id(mut self, fact_id: impl Into<String>) -> Self {
        self.fact_id = Some(fact_id.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixKind {
    Insert,
    Replace,
    Suggest,
    Map,
}

/// Advisory remediation attached to every issue. Never applied automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    #[serde(rename = "type")]
    pub kind: FixKind,
    pub suggestion: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

impl Fix {
    #[must_use]
    pub fn new(kind: FixKind, suggestion: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            kind,
            suggestion: suggestion.into(),
            action: action.into(),
            instructions: None,
            alternatives: Vec::new(),
            candidates: Vec::new(),
        }
    }

    /// A free-form suggestion the author applies by hand.
    #[must_use]
    pub fn manual(suggestion: impl Into<String>) -> Self {
        Self::new(FixKind::Suggest, suggestion, "manual")
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    #[must_use]
    pub fn with_alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }

    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }
}

/// A located, severity-ranked finding with its own fix and point cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub id: String,
    pub rule: Rule,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub location: Location,
    pub message: String,
    pub explanation: String,
    /// Declared point cost; always negative.
    pub score_impact: f64,
    pub fix: Fix,
}

impl Issue {
    /// A blocking error.
    #[must_use]
    pub fn error(
        rule: Rule,
        id: impl Into<String>,
        location: Location,
        score_impact: f64,
        fix: Fix,
    ) -> Self {
        Self::new(rule, id, IssueType::Error, Severity::Blocking, location, score_impact, fix)
    }

    /// A non-blocking warning.
    #[must_use]
    pub fn warning(
        rule: Rule,
        id: impl Into<String>,
        location: Location,
        score_impact: f64,
        fix: Fix,
    ) -> Self {
        Self::new(
            rule,
            id,
            IssueType::Warning,
            Severity::NonBlocking,
            location,
            score_impact,
            fix,
        )
    }

    #[must_use]
    pub fn new(
        rule: Rule,
        id: impl Into<String>,
        issue_type: IssueType,
        severity: Severity,
        location: Location,
        score_impact: f64,
        fix: Fix,
    ) -> Self {
        Self {
            id: id.into(),
            rule,
            issue_type,
            severity,
            location,
            message: String::new(),
            explanation: String::new(),
            score_impact: -score_impact.abs(),
            fix,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.issue_type, IssueType::Error)
    }

    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.issue_type, IssueType::Warning)
    }

    /// Blocking errors make the document unusable until fixed.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.severity, Severity::Blocking) && self.is_error()
    }
}

/// Read-only inputs shared by every checker during one analysis.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub document: &'a Document,
    /// Caller-declared key facts (distinct from `document.facts`).
    pub key_facts: &'a [Fact],
    /// Entities named in the title, answer box and first regular section.
    pub entities: &'a [String],
    pub vocabulary: &'a CompiledVocabulary,
}

/// One rule's share of the total score.
///
/// `details` carries rule-specific figures and is flattened into the
/// serialized object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleScore {
    pub score: f64,
    pub max: f64,
    pub issues: usize,
    #[serde(flatten)]
    pub details: IndexMap<String, serde_json::Value>,
}

impl RuleScore {
    /// Score clamped to `[0, max]`.
    #[must_use]
    pub fn new(rule: Rule, score: f64, issues: usize) -> Self {
        let max = rule.max_score();
        Self {
            score: score.clamp(0.0, max),
            max,
            issues,
            details: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn full(rule: Rule) -> Self {
        Self::new(rule, rule.max_score(), 0)
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.get(key)
    }
}

pub trait RuleChecker: Sync {
    fn rule(&self) -> Rule;

    /// Inspect the document; issues follow section then paragraph order.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue>;

    /// Derive this rule's points from the document and the merged issue list.
    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore;

    /// Budget, thresholds and penalty table.
    fn explain(&self) -> RuleExplanation;
}

/// Issues belonging to `rule`.
pub(crate) fn issues_for(rule: Rule, issues: &[Issue]) -> impl Iterator<Item = &Issue> {
    issues.iter().filter(move |issue| issue.rule == rule)
}

/// `(errors, warnings)` among `rule`'s issues.
pub(crate) fn count_by_type(rule: Rule, issues: &[Issue]) -> (usize, usize) {
    issues_for(rule, issues).fold((0, 0), |(errors, warnings), issue| {
        if issue.is_error() {
            (errors + 1, warnings)
        } else {
            (errors, warnings + 1)
        }
    })
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn as_f64(n: usize) -> f64 {
    n as f64
}

/// `base` minus `penalty` for each counted occurrence.
pub(crate) fn deduct(base: f64, deductions: &[(usize, f64)]) -> f64 {
    deductions
        .iter()
        .fold(base, |score, &(count, penalty)| as_f64(count).mul_add(-penalty, score))
}

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
