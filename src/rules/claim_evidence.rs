use crate::document::text::contains_ignore_case;
use crate::document::{Document, Section};
use crate::facts::Fact;

use super::{
    Fix, FixKind, Issue, Location, Rule, RuleChecker, RuleContext, RuleExplanation, RuleScore, as_f64,
    count_by_type, deduct,
};

/// Token gap between claim and support above which a bridge is suggested.
pub const BRIDGING_DISTANCE_TOKENS: i64 = 900;
/// Supporting sections past this index (answer box included) need a bridging phrase.
pub const BRIDGING_SECTION_INDEX: usize = 2;
/// Share of key-fact subjects a conclusion should restate.
pub const CONCLUSION_COVERAGE: f64 = 0.5;

const NO_FACTS_PENALTY: f64 = 20.0;
const UNMAPPED_PENALTY: f64 = 5.0;
const DISTANCE_PENALTY: f64 = 2.0;
const BRIDGING_PENALTY: f64 = 1.0;
const SPAN_PENALTY: f64 = 1.0;
const CONCLUSION_PENALTY: f64 = 2.0;

const SCORE_ERROR_PENALTY: f64 = 5.0;
const SCORE_WARNING_PENALTY: f64 = 0.5;

/// The section a key fact was mapped to.
#[derive(Debug, Clone, Copy)]
struct Mapping<'a> {
    /// Index in `document.sections`, answer box included.
    index: usize,
    section: &'a Section,
}

pub struct ClaimEvidence;

impl RuleChecker for ClaimEvidence {
    fn rule(&self) -> Rule {
        Rule::ClaimEvidence
    }

    fn explain(&self) -> RuleExplanation {
        RuleExplanation::new(
            Rule::ClaimEvidence,
            "20 times the share of mapped key facts, minus 5 per error and 0.5 per warning; 0 without key facts",
        )
        .threshold("bridging_distance_tokens", BRIDGING_DISTANCE_TOKENS)
        .threshold("bridging_section_index", BRIDGING_SECTION_INDEX)
        .threshold("conclusion_coverage", format!("{:.0}%", CONCLUSION_COVERAGE * 100.0))
        .error("claim-evidence-no-facts", NO_FACTS_PENALTY)
        .error("claim-evidence-unmapped", UNMAPPED_PENALTY)
        .warning("claim-evidence-distance", DISTANCE_PENALTY)
        .warning("claim-evidence-bridging", BRIDGING_PENALTY)
        .warning("claim-evidence-span", SPAN_PENALTY)
        .warning("claim-evidence-conclusion", CONCLUSION_PENALTY)
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        if ctx.key_facts.is_empty() {
            return vec![no_facts()];
        }

        let mut issues = Vec::new();
        for (idx, fact) in ctx.key_facts.iter().enumerate() {
            match find_support(fact, ctx.document) {
                None => issues.push(unmapped(fact, idx)),
                Some(mapping) => {
                    issues.extend(check_distance(fact, idx, mapping, ctx.document));
                    issues.extend(check_bridging(ctx, fact, idx, mapping));
                }
            }
            if !fact.has_evidence() {
                issues.push(missing_span(fact, idx));
            }
        }
        issues.extend(check_conclusion(ctx));
        issues
    }

    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore {
        let total = ctx.key_facts.len();
        if total == 0 {
            return RuleScore::new(Rule::ClaimEvidence, 0.0, 1)
                .with_detail("mapped", 0)
                .with_detail("total", 0);
        }

        let mapped = ctx
            .key_facts
            .iter()
            .filter(|fact| find_support(fact, ctx.document).is_some())
            .count();
        let base = Rule::ClaimEvidence.max_score() * as_f64(mapped) / as_f64(total);
        let (errors, warnings) = count_by_type(Rule::ClaimEvidence, issues);
        let score = deduct(
            base,
            &[(errors, SCORE_ERROR_PENALTY), (warnings, SCORE_WARNING_PENALTY)],
        );

        RuleScore::new(Rule::ClaimEvidence, score, errors + warnings)
            .with_detail("mapped", mapped)
            .with_detail("total", total)
    }
}

/// First non-answer-box section containing the fact's subject and, when
/// present, its predicate (case-insensitive).
fn find_support<'a>(fact: &Fact, document: &'a Document) -> Option<Mapping<'a>> {
    if fact.subject.is_empty() {
        return None;
    }
    document
        .sections
        .iter()
        .enumerate()
        .filter(|(_, section)| !section.is_answer_box)
        .find(|(_, section)| {
            contains_ignore_case(&section.text, &fact.subject)
                && (fact.predicate.is_empty() || contains_ignore_case(&section.text, &fact.predicate))
        })
        .map(|(index, section)| Mapping { index, section })
}

fn no_facts() -> Issue {
    Issue::error(
        Rule::ClaimEvidence,
        "claim-evidence-no-facts",
        Location::section("metadata"),
        NO_FACTS_PENALTY,
        Fix::manual("Add Key Facts in Subject-Predicate-Object format").with_instructions(
            "Write one fact per line as \"Subject | Predicate | Object\", or extract them from the narrative",
        ),
    )
    .with_message("No Key Facts defined")
    .with_explanation("Every article needs at least 3 Key Facts for LLM citations")
}

fn unmapped(fact: &Fact, idx: usize) -> Issue {
    let location = Location::fact(idx).with_fact_id(&fact.id);
    Issue::error(
        Rule::ClaimEvidence,
        format!("claim-evidence-unmapped-{idx}"),
        location,
        UNMAPPED_PENALTY,
        Fix::new(
            FixKind::Map,
            format!("Map this fact to a section that discusses {}", fact.subject),
            "selectSection",
        ),
    )
    .with_message(format!(
        "Key Fact \"{}\" has no supporting section",
        fact.summary()
    ))
    .with_explanation("Each Key Fact must be explained in detail in at least one section")
}

/// Tokens between the end of the claim (answer box, else first section) and
/// the start of the supporting section. Negative when support precedes the claim's end.
#[allow(clippy::cast_possible_wrap)]
fn support_distance(mapping: Mapping<'_>, document: &Document) -> i64 {
    let claim_tokens = document
        .answer_box()
        .or_else(|| document.first_regular_section())
        .map_or(0, |section| section.token_count);
    let support_offset: usize = document.sections[..mapping.index]
        .iter()
        .map(|section| section.token_count)
        .sum();
    support_offset as i64 - claim_tokens as i64
}

fn check_distance(
    fact: &Fact,
    idx: usize,
    mapping: Mapping<'_>,
    document: &Document,
) -> Option<Issue> {
    let distance = support_distance(mapping, document);
    if distance <= BRIDGING_DISTANCE_TOKENS {
        return None;
    }
    let section = mapping.section;
    Some(
        Issue::warning(
            Rule::ClaimEvidence,
            format!("claim-evidence-distance-{}-{idx}", section.id),
            Location::section(&section.id).with_fact_id(&fact.id),
            DISTANCE_PENALTY,
            bridging_fix(fact, section),
        )
        .with_message(format!("Fact support is {distance} tokens away from claim"))
        .with_explanation("Large gaps between claim and evidence hurt multi-hop retrieval"),
    )
}

fn check_bridging(
    ctx: &RuleContext<'_>,
    fact: &Fact,
    idx: usize,
    mapping: Mapping<'_>,
) -> Option<Issue> {
    let section = mapping.section;
    let bridged = ctx
        .vocabulary
        .tables
        .bridging_phrases
        .iter()
        .any(|phrase| contains_ignore_case(&section.text, phrase));
    if bridged || mapping.index <= BRIDGING_SECTION_INDEX {
        return None;
    }
    Some(
        Issue::warning(
            Rule::ClaimEvidence,
            format!("claim-evidence-bridging-{}-{idx}", section.id),
            Location::paragraph(&section.id, 0).with_fact_id(&fact.id),
            BRIDGING_PENALTY,
            bridging_fix(fact, section),
        )
        .with_message(format!(
            "Section \"{}\" discusses fact but lacks bridging reference",
            section.title
        ))
        .with_explanation("Add a sentence connecting this section back to the main claim"),
    )
}

fn bridging_fix(fact: &Fact, section: &Section) -> Fix {
    let subject = &fact.subject;
    let predicate = if fact.predicate.is_empty() {
        "concept"
    } else {
        fact.predicate.as_str()
    };
    let alternatives = vec![
        format!("This section applies the {subject} {predicate} defined earlier."),
        format!(
            "Returning to {subject}: {} demonstrates this principle.",
            section.title.to_lowercase()
        ),
        format!("Building on the {subject} claim, this section explains implementation."),
    ];
    Fix::new(FixKind::Insert, alternatives[0].clone(), "insertAtStart")
        .with_instructions("Add a bridging sentence at the start of this section")
        .with_alternatives(alternatives)
}

fn missing_span(fact: &Fact, idx: usize) -> Issue {
    Issue::warning(
        Rule::ClaimEvidence,
        format!("claim-evidence-span-{idx}"),
        Location::document().with_fact_id(&fact.id),
        SPAN_PENALTY,
        Fix::new(
            FixKind::Suggest,
            "Quote the sentence that states this fact as its evidence text",
            "extract",
        ),
    )
    .with_message(format!("Fact \"{}\" has no evidence span", fact.summary()))
    .with_explanation("Facts should point to exact text in narrative for grounding")
}

/// A conclusion-titled final section should restate at least half the key-fact subjects.
fn check_conclusion(ctx: &RuleContext<'_>) -> Option<Issue> {
    let conclusion = ctx.document.regular_sections().last()?;
    let vocab = &ctx.vocabulary.tables;
    if !vocab
        .conclusion_titles
        .iter()
        .any(|title| contains_ignore_case(&conclusion.title, title))
    {
        return None;
    }

    let total = ctx.key_facts.len();
    let restated = ctx
        .key_facts
        .iter()
        .filter(|fact| !fact.subject.is_empty() && contains_ignore_case(&conclusion.text, &fact.subject))
        .count();
    if as_f64(restated) / as_f64(total) >= CONCLUSION_COVERAGE {
        return None;
    }

    let subjects: Vec<&str> = ctx
        .key_facts
        .iter()
        .map(|fact| fact.subject.as_str())
        .filter(|subject| !subject.is_empty())
        .take(3)
        .collect();
    Some(
        Issue::warning(
            Rule::ClaimEvidence,
            "claim-evidence-conclusion",
            Location::section(&conclusion.id),
            CONCLUSION_PENALTY,
            Fix::manual("Add a sentence summarizing each Key Fact")
                .with_instructions(format!("Mention: {}", subjects.join(", "))),
        )
        .with_message(format!(
            "Conclusion only restates {restated}/{total} Key Facts"
        ))
        .with_explanation("Good conclusions explicitly restate main claims for retrieval"),
    )
}

#[cfg(test)]
#[path = "claim_evidence_tests.rs"]
mod tests;
