use std::fmt;

use serde::Serialize;

use crate::document::text::{contains_ignore_case, contains_word, count_word};
use crate::document::{Document, Section};
use crate::facts::Fact;

use super::{Fix, Issue, Location, Rule, RuleChecker, RuleContext, RuleExplanation, RuleScore, as_f64};

/// Ideal facts per 100 words, inclusive on both ends.
pub const IDEAL_DENSITY_MIN: f64 = 0.8;
pub const IDEAL_DENSITY_MAX: f64 = 2.0;
/// Past `IDEAL_DENSITY_MAX` the band score decays to 0 over this span.
const OVERAGE_SPAN: f64 = 1.0;
/// Density above `IDEAL_DENSITY_MAX` times this is reported as too high.
const HIGH_DENSITY_FACTOR: f64 = 1.5;

const HEDGE_RATIO: f64 = 0.05;
const MIN_HEDGES: usize = 3;
const MIN_VIBE_CLAIMS: usize = 2;

const LOW_PENALTY: f64 = 3.0;
const HIGH_PENALTY: f64 = 1.0;
const DEAD_ZONE_PENALTY: f64 = 2.0;
const HEDGE_PENALTY: f64 = 1.0;
const VIBE_PENALTY: f64 = 1.0;
/// Cap on each of the score's dead-zone and warning deductions.
const MAX_DEDUCTION: usize = 5;

const DEAD_ZONE_PREFIX: &str = "fact-density-dead-zone-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityBand {
    Low,
    Ideal,
    High,
}

impl DensityBand {
    #[must_use]
    pub fn of(density: f64) -> Self {
        if density < IDEAL_DENSITY_MIN {
            Self::Low
        } else if density > IDEAL_DENSITY_MAX {
            Self::High
        } else {
            Self::Ideal
        }
    }
}

impl fmt::Display for DensityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Ideal => "ideal",
            Self::High => "high",
        })
    }
}

/// Facts per 100 words; 0 for an empty document.
#[must_use]
pub fn fact_density(document: &Document) -> f64 {
    let words = document.metadata.total_words;
    if words == 0 {
        return 0.0;
    }
    as_f64(document.facts.len()) / as_f64(words) * 100.0
}

/// 1.0 inside the ideal band, linear toward 0 on either side.
#[must_use]
pub fn band_score(density: f64) -> f64 {
    match DensityBand::of(density) {
        DensityBand::Ideal => 1.0,
        DensityBand::Low => (density / IDEAL_DENSITY_MIN).max(0.0),
        DensityBand::High => (1.0 - (density - IDEAL_DENSITY_MAX) / OVERAGE_SPAN).max(0.0),
    }
}

fn supports(fact: &Fact, section: &Section) -> bool {
    fact.source_section_id.as_deref() == Some(section.id.as_str())
        || fact
            .evidence_text
            .as_deref()
            .is_some_and(|evidence| contains_ignore_case(&section.text, evidence))
}

/// A multi-paragraph content section that no fact maps to.
#[must_use]
pub fn is_dead_zone(section: &Section, facts: &[Fact]) -> bool {
    !section.is_answer_box
        && section.paragraphs.len() >= 2
        && !facts.iter().any(|fact| supports(fact, section))
}

pub struct FactDensity;

impl RuleChecker for FactDensity {
    fn rule(&self) -> Rule {
        Rule::FactDensity
    }

    fn explain(&self) -> RuleExplanation {
        RuleExplanation::new(
            Rule::FactDensity,
            "15 times the density band score, minus 1 per dead zone and 1 per other warning (each capped at 5)",
        )
        .threshold(
            "ideal_density",
            format!("{IDEAL_DENSITY_MIN}-{IDEAL_DENSITY_MAX} facts per 100 words"),
        )
        .threshold("high_density", IDEAL_DENSITY_MAX * HIGH_DENSITY_FACTOR)
        .threshold(
            "hedge_ratio",
            format!("{:.0}% with at least {MIN_HEDGES}", HEDGE_RATIO * 100.0),
        )
        .threshold("vibe_claims", MIN_VIBE_CLAIMS)
        .warning("fact-density-low", LOW_PENALTY)
        .warning("fact-density-high", HIGH_PENALTY)
        .warning("fact-density-dead-zone", DEAD_ZONE_PENALTY)
        .warning("fact-density-hedge", HEDGE_PENALTY)
        .warning("fact-density-vibe", VIBE_PENALTY)
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let document = ctx.document;
        let mut issues = Vec::new();
        issues.extend(check_band(fact_density(document)));

        for section in document.regular_sections() {
            if is_dead_zone(section, &document.facts) {
                issues.push(dead_zone(section));
            }
        }
        for section in document.regular_sections() {
            issues.extend(check_hedging(ctx, section));
        }
        for section in document.regular_sections() {
            issues.extend(check_vibe_claims(ctx, section));
        }
        issues
    }

    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore {
        let document = ctx.document;
        let density = fact_density(document);
        let dead_zones = document
            .regular_sections()
            .filter(|section| is_dead_zone(section, &document.facts))
            .count();
        let rule_issues: Vec<&Issue> = super::issues_for(Rule::FactDensity, issues).collect();
        // Dead zones are deducted on their own.
        let warnings = rule_issues
            .iter()
            .filter(|issue| issue.is_warning() && !issue.id.starts_with(DEAD_ZONE_PREFIX))
            .count();

        let score = Rule::FactDensity.max_score() * band_score(density)
            - as_f64(dead_zones.min(MAX_DEDUCTION))
            - as_f64(warnings.min(MAX_DEDUCTION));

        RuleScore::new(Rule::FactDensity, score, rule_issues.len())
            .with_detail("density", (density * 100.0).round() / 100.0)
            .with_detail("facts", document.facts.len())
            .with_detail("words", document.metadata.total_words)
            .with_detail("dead_zones", dead_zones)
            .with_detail("band", DensityBand::of(density).to_string())
    }
}

fn check_band(density: f64) -> Option<Issue> {
    if density < IDEAL_DENSITY_MIN {
        return Some(
            Issue::warning(
                Rule::FactDensity,
                "fact-density-low",
                Location::section("document"),
                LOW_PENALTY,
                Fix::manual("Add specific facts: numbers, definitions, rules, comparisons")
                    .with_instructions("Convert vague statements into concrete claims"),
            )
            .with_message(format!(
                "Low fact density: {density:.2} facts per 100 words (target: {IDEAL_DENSITY_MIN}-{IDEAL_DENSITY_MAX})"
            ))
            .with_explanation("Content needs more concrete, verifiable facts"),
        );
    }
    if density > IDEAL_DENSITY_MAX * HIGH_DENSITY_FACTOR {
        return Some(
            Issue::warning(
                Rule::FactDensity,
                "fact-density-high",
                Location::section("document"),
                HIGH_PENALTY,
                Fix::manual("Add context sentences to connect facts"),
            )
            .with_message(format!(
                "Very high fact density: {density:.2} per 100 words"
            ))
            .with_explanation("Consider adding explanatory context between facts"),
        );
    }
    None
}

fn dead_zone(section: &Section) -> Issue {
    Issue::warning(
        Rule::FactDensity,
        format!("{DEAD_ZONE_PREFIX}{}", section.id),
        Location::section(&section.id),
        DEAD_ZONE_PENALTY,
        Fix::manual("Add specific facts, numbers, or definitions")
            .with_instructions("Convert general statements into verifiable claims"),
    )
    .with_message(format!(
        "Section \"{}\" has no extractable facts (dead zone)",
        section.title
    ))
    .with_explanation("This section may be fluff or lack concrete information")
}

fn check_hedging(ctx: &RuleContext<'_>, section: &Section) -> Option<Issue> {
    if section.word_count == 0 {
        return None;
    }
    let hedges = &ctx.vocabulary.tables.hedge_words;
    let count: usize = hedges.iter().map(|hedge| count_word(&section.text, hedge)).sum();
    if count < MIN_HEDGES || as_f64(count) / as_f64(section.word_count) <= HEDGE_RATIO {
        return None;
    }

    let found: Vec<&str> = hedges
        .iter()
        .filter(|hedge| contains_word(&section.text, hedge))
        .take(5)
        .map(String::as_str)
        .collect();
    Some(
        Issue::warning(
            Rule::FactDensity,
            format!("fact-density-hedge-{}", section.id),
            Location::section(&section.id),
            HEDGE_PENALTY,
            Fix::manual("Replace hedge words with definitive statements when possible")
                .with_instructions(format!("Common hedges found: {}", found.join(", "))),
        )
        .with_message(format!(
            "Section \"{}\" has excessive hedging ({count} hedge words)",
            section.title
        ))
        .with_explanation("Too much uncertainty language weakens factual authority"),
    )
}

fn check_vibe_claims(ctx: &RuleContext<'_>, section: &Section) -> Option<Issue> {
    let claims = ctx.vocabulary.vibe_claims(&section.text);
    if claims.len() < MIN_VIBE_CLAIMS {
        return None;
    }
    Some(
        Issue::warning(
            Rule::FactDensity,
            format!("fact-density-vibe-{}", section.id),
            Location::section(&section.id),
            VIBE_PENALTY,
            Fix::manual("Add specific objects: \"improves rankings by 15%\" not just \"improves\"")
                .with_instructions(format!(
                    "Found vague claims: {}",
                    claims.iter().take(3).copied().collect::<Vec<_>>().join(", ")
                )),
        )
        .with_message(format!(
            "Section \"{}\" contains vague claims without specifics",
            section.title
        ))
        .with_explanation("Vague positive statements need concrete objects/metrics"),
    )
}

#[cfg(test)]
#[path = "fact_density_tests.rs"]
mod tests;
