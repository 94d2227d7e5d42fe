use crate::document::text::{capitalize_first, contains_ignore_case, contains_word, count_words};
use crate::document::{Section, extract_entities};
use crate::vocabulary::Vocabulary;

use super::{
    Fix, FixKind, Issue, Location, Rule, RuleChecker, RuleContext, RuleExplanation, RuleScore, as_f64,
    count_by_type, deduct,
};

/// Titles scoring below this are flagged as unspecific.
pub const MIN_HEADER_SCORE: f64 = 0.4;
/// Preferred title length in words, inclusive.
pub const HEADER_WORDS: (usize, usize) = (4, 12);

// Component weights in tenths so a perfect title sums to exactly 1.0.
const TOPIC_WEIGHT: u8 = 4;
const QUALIFIER_WEIGHT: u8 = 4;
const ENTITY_WEIGHT: u8 = 2;
const LENGTH_PENALTY: u8 = 1;

const GENERIC_PENALTY: f64 = 2.0;
const LOW_SCORE_PENALTY: f64 = 2.0;
const VAGUE_PENALTY: f64 = 1.0;
const CONSECUTIVE_PENALTY: f64 = 5.0;

const SCORE_ERROR_PENALTY: f64 = 5.0;
const SCORE_WARNING_PENALTY: f64 = 2.0;

/// How a title scored and what it lacks.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderAssessment {
    pub total: f64,
    pub has_topic: bool,
    pub has_qualifier: bool,
    pub has_entity: bool,
    pub length_penalty: bool,
    pub missing: Vec<&'static str>,
}

impl HeaderAssessment {
    #[must_use]
    pub fn of(section: &Section, vocab: &Vocabulary) -> Self {
        let title = section.title.as_str();
        let has_topic = vocab
            .topic_keywords
            .iter()
            .any(|keyword| contains_ignore_case(title, keyword));
        let has_qualifier = vocab
            .qualifiers
            .iter()
            .any(|qualifier| contains_word(title, qualifier));
        let has_entity = extract_entities(&section.text, &vocab.entity_stop_words)
            .iter()
            .any(|entity| contains_ignore_case(title, entity));
        let words = count_words(title);
        let length_penalty = words < HEADER_WORDS.0 || words > HEADER_WORDS.1;

        let mut missing = Vec::new();
        let mut tenths = 0;
        for (present, weight, label) in [
            (has_topic, TOPIC_WEIGHT, "topic keyword"),
            (has_qualifier, QUALIFIER_WEIGHT, "qualifier word"),
            (has_entity, ENTITY_WEIGHT, "entity from content"),
        ] {
            if present {
                tenths += weight;
            } else {
                missing.push(label);
            }
        }
        if length_penalty {
            tenths = tenths.saturating_sub(LENGTH_PENALTY);
        }

        Self {
            total: f64::from(tenths) / 10.0,
            has_topic,
            has_qualifier,
            has_entity,
            length_penalty,
            missing,
        }
    }
}

fn is_generic(title: &str, vocab: &Vocabulary) -> bool {
    let title = title.trim();
    vocab
        .generic_headers
        .iter()
        .any(|generic| generic.eq_ignore_ascii_case(title))
}

pub struct HeaderSpecificity;

impl RuleChecker for HeaderSpecificity {
    fn rule(&self) -> Rule {
        Rule::HeaderSpecificity
    }

    fn explain(&self) -> RuleExplanation {
        RuleExplanation::new(
            Rule::HeaderSpecificity,
            "15 times the mean header specificity, minus 5 per error and 2 per warning",
        )
        .threshold("min_header_score", MIN_HEADER_SCORE)
        .threshold("header_words", format!("{}-{}", HEADER_WORDS.0, HEADER_WORDS.1))
        .threshold(
            "weights",
            format!(
                "topic {TOPIC_WEIGHT}, qualifier {QUALIFIER_WEIGHT}, entity {ENTITY_WEIGHT}, length -{LENGTH_PENALTY} (tenths)"
            ),
        )
        .warning("header-specificity-generic", GENERIC_PENALTY)
        .warning("header-specificity-low", LOW_SCORE_PENALTY)
        .warning("header-specificity-vague", VAGUE_PENALTY)
        .error("header-specificity-consecutive", CONSECUTIVE_PENALTY)
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let vocab = &ctx.vocabulary.tables;
        let mut issues: Vec<Issue> = ctx
            .document
            .regular_sections()
            .filter_map(|section| check_header(section, vocab))
            .collect();
        issues.extend(check_consecutive_generic(ctx));
        issues
    }

    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore {
        let vocab = &ctx.vocabulary.tables;
        let scores: Vec<f64> = ctx
            .document
            .regular_sections()
            .map(|section| HeaderAssessment::of(section, vocab).total)
            .collect();
        if scores.is_empty() {
            return RuleScore::full(Rule::HeaderSpecificity)
                .with_detail("avg_specificity", 100.0)
                .with_detail("sections_analyzed", 0);
        }

        let mean = scores.iter().sum::<f64>() / as_f64(scores.len());
        let (errors, warnings) = count_by_type(Rule::HeaderSpecificity, issues);
        let score = deduct(
            Rule::HeaderSpecificity.max_score() * mean,
            &[(errors, SCORE_ERROR_PENALTY), (warnings, SCORE_WARNING_PENALTY)],
        );

        RuleScore::new(Rule::HeaderSpecificity, score, errors + warnings)
            .with_detail("avg_specificity", (mean * 100.0).round())
            .with_detail("sections_analyzed", scores.len())
    }
}

/// At most one issue per header: generic, then low score, then vague noun.
fn check_header(section: &Section, vocab: &Vocabulary) -> Option<Issue> {
    let title = section.title.as_str();
    let location = Location::section(&section.id).with_header(title);

    if is_generic(title, vocab) {
        return Some(
            Issue::warning(
                Rule::HeaderSpecificity,
                format!("header-specificity-generic-{}", section.id),
                location,
                GENERIC_PENALTY,
                suggest_header(section, vocab),
            )
            .with_message(format!("Header \"{title}\" is too generic"))
            .with_explanation(
                "Generic headers don't help retrieval. Be specific about what this section covers.",
            ),
        );
    }

    let assessment = HeaderAssessment::of(section, vocab);
    if assessment.total < MIN_HEADER_SCORE {
        return Some(
            Issue::warning(
                Rule::HeaderSpecificity,
                format!("header-specificity-low-{}", section.id),
                location,
                LOW_SCORE_PENALTY,
                suggest_header(section, vocab),
            )
            .with_message(format!(
                "Header \"{title}\" lacks specificity (score: {:.0}%)",
                assessment.total * 100.0
            ))
            .with_explanation(format!("Add: {}", assessment.missing.join(", "))),
        );
    }

    let vague = vocab.vague_nouns.iter().any(|noun| contains_word(title, noun));
    vague.then(|| {
        Issue::warning(
            Rule::HeaderSpecificity,
            format!("header-specificity-vague-{}", section.id),
            location,
            VAGUE_PENALTY,
            suggest_header(section, vocab),
        )
        .with_message(format!("Header \"{title}\" contains vague noun"))
        .with_explanation("Replace vague nouns with specific concepts")
    })
}

/// Two or more generic headers in a row anywhere in the document.
fn check_consecutive_generic(ctx: &RuleContext<'_>) -> Option<Issue> {
    let vocab = &ctx.vocabulary.tables;
    let mut longest: Vec<&str> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for section in ctx.document.regular_sections() {
        if is_generic(&section.title, vocab) {
            current.push(&section.title);
            if current.len() > longest.len() {
                longest.clone_from(&current);
            }
        } else {
            current.clear();
        }
    }
    if longest.len() < 2 {
        return None;
    }

    Some(
        Issue::error(
            Rule::HeaderSpecificity,
            "header-specificity-consecutive",
            Location::section("document"),
            CONSECUTIVE_PENALTY,
            Fix::manual(format!("Rename: {}", longest.join(", ")))
                .with_instructions("Make headers specific to section content"),
        )
        .with_message(format!(
            "{} consecutive generic headers detected",
            longest.len()
        ))
        .with_explanation("Multiple generic headers in a row hurt content structure"),
    )
}

fn first_word_match<'v>(text: &str, words: &'v [String]) -> Option<&'v str> {
    words
        .iter()
        .find(|word| contains_word(text, word))
        .map(String::as_str)
}

/// Query-ready alternatives built from the section body's own keywords.
fn suggest_header(section: &Section, vocab: &Vocabulary) -> Fix {
    let text = section.text.as_str();
    let entities = extract_entities(text, &vocab.entity_stop_words);
    let topic = vocab
        .topic_keywords
        .iter()
        .find(|keyword| contains_ignore_case(text, keyword))
        .map(String::as_str)
        .or_else(|| entities.first().map(String::as_str))
        .unwrap_or(&section.title);
    let qualifier = first_word_match(text, &vocab.qualifiers).unwrap_or("key");
    let action = first_word_match(text, &vocab.header_actions).unwrap_or("guide");
    let context = first_word_match(text, &vocab.header_contexts).unwrap_or("implementation");

    let suggestions: Vec<String> = [
        format!("{qualifier} {topic} {action}"),
        format!("How {topic} {action}"),
        format!("{topic} {action} for {context}"),
        format!("Understanding {topic} {qualifier} {action}"),
    ]
    .iter()
    .map(|template| capitalize_first(&template.split_whitespace().collect::<Vec<_>>().join(" ")))
    .filter(|template| (10..=80).contains(&template.chars().count()))
    .collect();

    let suggestion = suggestions
        .first()
        .cloned()
        .unwrap_or_else(|| format!("{topic} Implementation Guide"));
    Fix::new(FixKind::Replace, suggestion, "renameHeader")
        .with_instructions("Use a query-ready header that includes topic + qualifier")
        .with_alternatives(suggestions.into_iter().skip(1).take(2).collect())
}

#[cfg(test)]
#[path = "header_specificity_tests.rs"]
mod tests;
