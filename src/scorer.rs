//! Turns a document and its issues into the 0-100 score.

use serde::Serialize;

use crate::document::Document;
use crate::facts::Fact;
use crate::linter::{Linter, Status, blocking_issues, determine_status};
use crate::rules::{Issue, IssueType, Rule, RuleScore};

/// How many ranked fixes a score carries by default.
pub const DEFAULT_TOP_FIXES: usize = 5;

/// Per-rule scores, one field per rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub section_anchoring: RuleScore,
    pub entity_persistence: RuleScore,
    pub claim_evidence: RuleScore,
    pub header_specificity: RuleScore,
    pub fact_density: RuleScore,
    pub fact_quality: RuleScore,
}

impl Breakdown {
    #[must_use]
    pub const fn get(&self, rule: Rule) -> &RuleScore {
        match rule {
            Rule::SectionAnchoring => &self.section_anchoring,
            Rule::EntityPersistence => &self.entity_persistence,
            Rule::ClaimEvidence => &self.claim_evidence,
            Rule::HeaderSpecificity => &self.header_specificity,
            Rule::FactDensity => &self.fact_density,
            Rule::FactQuality => &self.fact_quality,
        }
    }

    /// `(rule, score)` pairs in [`Rule::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, &RuleScore)> {
        Rule::ALL.into_iter().map(move |rule| (rule, self.get(rule)))
    }

    /// Unrounded sum of the six rule scores.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, score)| score.score).sum()
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.iter().map(|(_, score)| score.max).sum()
    }
}

/// One of the highest-impact issues, as shown to the author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopFix {
    pub issue_id: String,
    /// Points recovered by fixing the issue.
    pub impact: f64,
    /// What is wrong.
    pub fix: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub suggestion: String,
}

impl TopFix {
    fn from_issue(issue: &Issue) -> Self {
        let suggestion = if issue.fix.suggestion.is_empty() {
            issue.fix.instructions.clone().unwrap_or_default()
        } else {
            issue.fix.suggestion.clone()
        };
        Self {
            issue_id: issue.id.clone(),
            impact: issue.score_impact.abs(),
            fix: issue.message.clone(),
            issue_type: issue.issue_type,
            suggestion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub total: u8,
    pub breakdown: Breakdown,
    pub status: Status,
    pub blocking_issues: usize,
    pub top_fixes: Vec<TopFix>,
}

/// Issues with a nonzero cost, largest cost first; ties keep issue order.
#[must_use]
pub fn rank_fixes_by_impact(issues: &[Issue]) -> Vec<TopFix> {
    let mut ranked: Vec<&Issue> = issues
        .iter()
        .filter(|issue| issue.score_impact != 0.0)
        .collect();
    ranked.sort_by(|a, b| b.score_impact.abs().total_cmp(&a.score_impact.abs()));
    ranked.into_iter().map(TopFix::from_issue).collect()
}

/// Round once, at the total.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_total(sum: f64) -> u8 {
    sum.round().clamp(0.0, 100.0) as u8
}

impl Linter {
    /// Score `issues` (as produced by [`Linter::lint`]) against `document`.
    #[must_use]
    pub fn score(
        &self,
        document: &Document,
        issues: &[Issue],
        key_facts: &[Fact],
        top_fixes: usize,
    ) -> Score {
        let entities = self.entities(document);
        let ctx = self.context(document, key_facts, &entities);
        let score_of = |rule: Rule| rule.checker().score(&ctx, issues);

        let breakdown = Breakdown {
            section_anchoring: score_of(Rule::SectionAnchoring),
            entity_persistence: score_of(Rule::EntityPersistence),
            claim_evidence: score_of(Rule::ClaimEvidence),
            header_specificity: score_of(Rule::HeaderSpecificity),
            fact_density: score_of(Rule::FactDensity),
            fact_quality: score_of(Rule::FactQuality),
        };
        let total = round_total(breakdown.sum());
        tracing::debug!(total, issues = issues.len(), "document scored");

        let mut ranked = rank_fixes_by_impact(issues);
        ranked.truncate(top_fixes);
        Score {
            total,
            breakdown,
            status: determine_status(issues),
            blocking_issues: blocking_issues(issues).len(),
            top_fixes: ranked,
        }
    }
}

/// Score with the built-in vocabulary and [`DEFAULT_TOP_FIXES`].
#[must_use]
pub fn calculate_score(document: &Document, issues: &[Issue], key_facts: &[Fact]) -> Score {
    Linter::default().score(document, issues, key_facts, DEFAULT_TOP_FIXES)
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;
