use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::document::{SUMMARY_MAX_WORDS, SUMMARY_MIN_WORDS, Section, extract_entities};
use crate::document::text::contains_word;
use crate::vocabulary::CompiledVocabulary;

use super::{
    Fix, FixKind, Issue, Location, Rule, RuleChecker, RuleContext, RuleExplanation, RuleScore,
    count_by_type, deduct,
};

/// Sections above either size must end with an anchor summary.
pub const ANCHOR_TOKEN_THRESHOLD: usize = 700;
pub const ANCHOR_WORD_THRESHOLD: usize = 500;

const MISSING_PENALTY: f64 = 5.0;
const PRONOUN_PENALTY: f64 = 2.0;
const VAGUE_PENALTY: f64 = 1.0;

static IT_PRONOUN: OnceLock<Regex> = OnceLock::new();
static THIS_PRONOUN: OnceLock<Regex> = OnceLock::new();
static THAT_PRONOUN: OnceLock<Regex> = OnceLock::new();

fn pronoun_regex(cell: &'static OnceLock<Regex>, word: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&format!(r"(?i)\b{word}\b")).expect("valid regex"))
}

/// Whether a section is long enough to need an anchor summary.
#[must_use]
pub const fn requires_anchor(section: &Section) -> bool {
    !section.is_answer_box
        && (section.token_count > ANCHOR_TOKEN_THRESHOLD || section.word_count > ANCHOR_WORD_THRESHOLD)
}

pub struct SectionAnchoring;

impl RuleChecker for SectionAnchoring {
    fn rule(&self) -> Rule {
        Rule::SectionAnchoring
    }

    fn explain(&self) -> RuleExplanation {
        RuleExplanation::new(
            Rule::SectionAnchoring,
            "20 minus 5 per missing summary and 2 per summary warning; full marks when no section needs an anchor",
        )
        .threshold("section_tokens", ANCHOR_TOKEN_THRESHOLD)
        .threshold("section_words", ANCHOR_WORD_THRESHOLD)
        .threshold("summary_words", format!("{SUMMARY_MIN_WORDS}-{SUMMARY_MAX_WORDS}"))
        .error("section-anchor", MISSING_PENALTY)
        .warning("section-anchor-pronoun", PRONOUN_PENALTY)
        .warning("section-anchor-vague", VAGUE_PENALTY)
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        ctx.document
            .sections
            .iter()
            .filter(|section| requires_anchor(section))
            .filter_map(|section| {
                if section.has_summary {
                    validate_summary(section, ctx.vocabulary)
                } else {
                    Some(missing_summary(section, ctx.vocabulary))
                }
            })
            .collect()
    }

    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore {
        let required = ctx
            .document
            .sections
            .iter()
            .filter(|section| requires_anchor(section))
            .count();
        if required == 0 {
            return RuleScore::full(Rule::SectionAnchoring)
                .with_detail("required", 0)
                .with_detail("missing", 0);
        }

        let (errors, warnings) = count_by_type(Rule::SectionAnchoring, issues);
        let score = deduct(
            Rule::SectionAnchoring.max_score(),
            &[(errors, MISSING_PENALTY), (warnings, PRONOUN_PENALTY)],
        );

        RuleScore::new(Rule::SectionAnchoring, score, errors + warnings)
            .with_detail("required", required)
            .with_detail("missing", errors)
    }
}

fn missing_summary(section: &Section, vocab: &CompiledVocabulary) -> Issue {
    let location = Location::paragraph(&section.id, section.last_paragraph_index());
    Issue::error(
        Rule::SectionAnchoring,
        format!("section-anchor-{}", section.id),
        location,
        MISSING_PENALTY,
        draft_summary(section, vocab),
    )
    .with_message(format!(
        "Section \"{}\" is {} words but missing Crouton Summary",
        section.title, section.word_count
    ))
    .with_explanation("Long sections need a summary to maintain retrieval reliability")
}

/// Check an existing anchor for pronouns, then for vague wording.
fn validate_summary(section: &Section, vocab: &CompiledVocabulary) -> Option<Issue> {
    let last = section.last_paragraph()?;
    let summary = strip_marker(&last.text, &vocab.tables.summary_marker);
    let location = Location::paragraph(&section.id, last.index);

    let pronouns = vocab.summary_pronouns(summary);
    if !pronouns.is_empty() {
        let fix = Fix::new(
            FixKind::Suggest,
            replace_summary_pronouns(summary, section, vocab),
            "replaceText",
        );
        return Some(
            Issue::warning(
                Rule::SectionAnchoring,
                format!("section-anchor-pronoun-{}", section.id),
                location,
                PRONOUN_PENALTY,
                fix,
            )
            .with_message(format!(
                "Crouton Summary contains pronouns: {}",
                pronouns.join(", ")
            ))
            .with_explanation("Summaries should use explicit entity names for clarity"),
        );
    }

    let vague = vocab
        .tables
        .summary_vague_words
        .iter()
        .any(|word| contains_word(summary, word));
    vague.then(|| {
        Issue::warning(
            Rule::SectionAnchoring,
            format!("section-anchor-vague-{}", section.id),
            location,
            VAGUE_PENALTY,
            Fix::manual("Make the summary more specific with concrete details"),
        )
        .with_message("Crouton Summary contains vague predicates")
        .with_explanation("Be specific: use concrete verbs and measurable outcomes")
    })
}

fn strip_marker<'t>(text: &'t str, marker: &str) -> &'t str {
    match text.get(..marker.len()) {
        Some(prefix) if !marker.is_empty() && prefix.eq_ignore_ascii_case(marker) => {
            text[marker.len()..].trim_start()
        }
        _ => text,
    }
}

/// Template anchor naming the section's main entity and action.
fn draft_summary(section: &Section, vocab: &CompiledVocabulary) -> Fix {
    let entity = extract_entities(&section.text, &vocab.tables.entity_stop_words)
        .into_iter()
        .next()
        .unwrap_or_else(|| {
            section
                .title
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        });
    let action = first_action_word(&section.text, &vocab.tables.action_words)
        .unwrap_or_else(|| "defines".to_string());

    Fix::new(
        FixKind::Insert,
        format!(
            "{} This section explains how {entity} {action} for improved implementation.",
            vocab.tables.summary_marker
        ),
        "insertAtEnd",
    )
    .with_instructions(
        "Add this summary at the end of the section, or write your own (12-35 words, no pronouns)",
    )
}

fn first_action_word(text: &str, actions: &[String]) -> Option<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .find(|word| actions.iter().any(|action| action.eq_ignore_ascii_case(word)))
}

fn replace_summary_pronouns(summary: &str, section: &Section, vocab: &CompiledVocabulary) -> String {
    let entity = extract_entities(&section.text, &vocab.tables.entity_stop_words)
        .into_iter()
        .next()
        .unwrap_or_else(|| section.title.clone());
    let this_replacement = format!("this {}", section.title.to_lowercase());

    let replaced = pronoun_regex(&IT_PRONOUN, "it").replace_all(summary, NoExpand(&entity));
    let replaced =
        pronoun_regex(&THIS_PRONOUN, "this").replace_all(&replaced, NoExpand(&this_replacement));
    pronoun_regex(&THAT_PRONOUN, "that")
        .replace_all(&replaced, NoExpand(&entity))
        .into_owned()
}

#[cfg(test)]
#[path = "section_anchoring_tests.rs"]
mod tests;
