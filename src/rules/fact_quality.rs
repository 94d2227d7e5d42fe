use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::document::text::contains_word;
use crate::facts::Fact;
use crate::vocabulary::CompiledVocabulary;

use super::{
    Fix, FixKind, Issue, Location, Rule, RuleChecker, RuleContext, RuleExplanation, RuleScore, as_f64,
};

/// Minimum trimmed length of each fact part.
pub const MIN_PART_CHARS: usize = 2;
/// Objects longer than this count as specific even without a number.
pub const SPECIFIC_OBJECT_CHARS: usize = 30;

const STRUCTURE_PENALTY: f64 = 2.0;
const PRONOUN_PENALTY: f64 = 2.0;
const COMPOUND_PENALTY: f64 = 1.0;
const VAGUE_PENALTY: f64 = 1.0;
const UNGROUNDED_PENALTY: f64 = 2.0;
const NO_EVIDENCE_PENALTY: f64 = 0.5;

static COMPOUND_PREDICATE: OnceLock<Regex> = OnceLock::new();

fn compound_predicate() -> &'static Regex {
    COMPOUND_PREDICATE
        .get_or_init(|| Regex::new(r"(?i)\s+(?:and|or)\s+|,").expect("valid regex"))
}

pub struct FactQuality;

impl RuleChecker for FactQuality {
    fn rule(&self) -> Rule {
        Rule::FactQuality
    }

    fn explain(&self) -> RuleExplanation {
        RuleExplanation::new(
            Rule::FactQuality,
            "10 times the share of extracted facts without any issue; 0 without facts",
        )
        .threshold("min_part_chars", MIN_PART_CHARS)
        .threshold("specific_object_chars", SPECIFIC_OBJECT_CHARS)
        .error("fact-quality-structure", STRUCTURE_PENALTY)
        .error("fact-quality-pronoun", PRONOUN_PENALTY)
        .warning("fact-quality-compound", COMPOUND_PENALTY)
        .warning("fact-quality-vague", VAGUE_PENALTY)
        .error("fact-quality-ungrounded", UNGROUNDED_PENALTY)
        .warning("fact-quality-no-evidence", NO_EVIDENCE_PENALTY)
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (idx, fact) in ctx.document.facts.iter().enumerate() {
            issues.extend(check_structure(fact, idx));
            issues.extend(check_pronouns(fact, idx, ctx.vocabulary));
            issues.extend(check_predicate(fact, idx, ctx.vocabulary));
            issues.extend(check_grounding(fact, idx));
        }
        issues
    }

    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore {
        let total = ctx.document.facts.len();
        let rule_issues: Vec<&Issue> = super::issues_for(Rule::FactQuality, issues).collect();
        if total == 0 {
            return RuleScore::new(Rule::FactQuality, 0.0, rule_issues.len())
                .with_detail("valid_facts", 0)
                .with_detail("total_facts", 0)
                .with_detail("quality_rate", 0.0);
        }

        let invalid: IndexSet<usize> = rule_issues
            .iter()
            .filter_map(|issue| issue.location.fact_index)
            .collect();
        let valid = total.saturating_sub(invalid.len());
        let ratio = as_f64(valid) / as_f64(total);

        RuleScore::new(
            Rule::FactQuality,
            Rule::FactQuality.max_score() * ratio,
            rule_issues.len(),
        )
        .with_detail("valid_facts", valid)
        .with_detail("total_facts", total)
        .with_detail("quality_rate", (ratio * 100.0).round())
    }
}

fn check_structure(fact: &Fact, idx: usize) -> Vec<Issue> {
    [
        (
            "subject",
            &fact.subject,
            "Every fact needs a clear subject (entity or concept)",
            "Add explicit entity name (2+ characters)",
        ),
        (
            "predicate",
            &fact.predicate,
            "Every fact needs a clear predicate (action or relationship)",
            "Add concrete verb or relationship",
        ),
        (
            "object",
            &fact.object,
            "Every fact needs a clear object (what the subject does/is/has)",
            "Add specific outcome or value",
        ),
    ]
    .into_iter()
    .filter(|(_, value, _, _)| value.trim().chars().count() < MIN_PART_CHARS)
    .map(|(field, _, explanation, suggestion)| {
        let mut label = field.to_string();
        label[..1].make_ascii_uppercase();
        Issue::error(
            Rule::FactQuality,
            format!("fact-quality-structure-{field}-{idx}"),
            Location::fact(idx).with_field(field),
            STRUCTURE_PENALTY,
            Fix::manual(suggestion),
        )
        .with_message(format!(
            "Fact {}: {label} is missing or too short",
            idx + 1
        ))
        .with_explanation(explanation)
    })
    .collect()
}

fn check_pronouns(fact: &Fact, idx: usize, vocab: &CompiledVocabulary) -> Option<Issue> {
    let (field, value) = if vocab.has_fact_pronoun(&fact.subject) {
        ("subject", &fact.subject)
    } else if vocab.has_fact_pronoun(&fact.object) {
        ("object", &fact.object)
    } else {
        return None;
    };

    Some(
        Issue::error(
            Rule::FactQuality,
            format!("fact-quality-pronoun-{idx}"),
            Location::fact(idx).with_field(field),
            PRONOUN_PENALTY,
            Fix::new(
                FixKind::Replace,
                "Replace pronoun with explicit entity name",
                "manual",
            )
            .with_instructions(format!(
                "Change \"{value}\" to specific entity (e.g., \"301 redirect\", \"Google Search Console\")"
            )),
        )
        .with_message(format!(
            "Fact {}: Contains pronoun in {field}: \"{value}\"",
            idx + 1
        ))
        .with_explanation("Facts must use explicit entity names, not pronouns"),
    )
}

/// Compound predicates first; otherwise a vague predicate needs a measurable object.
fn check_predicate(fact: &Fact, idx: usize, vocab: &CompiledVocabulary) -> Option<Issue> {
    let predicate = fact.predicate.trim().to_lowercase();
    let location = Location::fact(idx).with_field("predicate");

    if compound_predicate().is_match(&predicate) {
        return Some(
            Issue::warning(
                Rule::FactQuality,
                format!("fact-quality-compound-{idx}"),
                location,
                COMPOUND_PENALTY,
                Fix::manual("Split into multiple facts, one predicate each").with_instructions(
                    format!(
                        "\"{} | {predicate} | {}\" -> Split at \"and/or\"",
                        fact.subject, fact.object
                    ),
                ),
            )
            .with_message(format!("Fact {}: Compound predicate detected", idx + 1))
            .with_explanation("Split compound facts into separate facts (one claim per fact)"),
        );
    }

    let tables = &vocab.tables;
    let vague = tables
        .vague_predicates
        .iter()
        .any(|word| contains_word(&predicate, word));
    if !vague || is_specific_object(&fact.object, &tables.measure_words) {
        return None;
    }

    Some(
        Issue::warning(
            Rule::FactQuality,
            format!("fact-quality-vague-{idx}"),
            location,
            VAGUE_PENALTY,
            Fix::manual("Add specific measurement or comparison to object").with_instructions(
                format!(
                    "\"{0} {predicate} X\" -> \"{0} {predicate} X by 15-20%\"",
                    fact.subject
                ),
            ),
        )
        .with_message(format!(
            "Fact {}: Vague predicate \"{predicate}\" needs specific object",
            idx + 1
        ))
        .with_explanation("Vague predicates need measurable outcomes"),
    )
}

fn is_specific_object(object: &str, measure_words: &[String]) -> bool {
    object.chars().any(|c| c.is_ascii_digit())
        || measure_words.iter().any(|word| contains_word(object, word))
        || object.chars().count() > SPECIFIC_OBJECT_CHARS
}

fn check_grounding(fact: &Fact, idx: usize) -> Option<Issue> {
    if fact.grounded == Some(true) || fact.evidence_text.is_some() {
        return None;
    }

    if fact.grounded == Some(false) {
        return Some(
            Issue::error(
                Rule::FactQuality,
                format!("fact-quality-ungrounded-{idx}"),
                Location::fact(idx),
                UNGROUNDED_PENALTY,
                Fix::manual("Remove fact or add supporting text to narrative")
                    .with_instructions("Facts must be explicitly stated in the content"),
            )
            .with_message(format!("Fact {}: Not grounded in source text", idx + 1))
            .with_explanation("This fact cannot be verified from the narrative content"),
        );
    }

    Some(
        Issue::warning(
            Rule::FactQuality,
            format!("fact-quality-no-evidence-{idx}"),
            Location::fact(idx),
            NO_EVIDENCE_PENALTY,
            Fix::new(
                FixKind::Suggest,
                "Quote the sentence that states this fact as its evidence text",
                "extract",
            ),
        )
        .with_message(format!("Fact {}: No evidence span provided", idx + 1))
        .with_explanation("Facts should reference exact text for grounding"),
    )
}

#[cfg(test)]
#[path = "fact_quality_tests.rs"]
mod tests;
