use indexmap::IndexSet;

use crate::document::entities::{
    count_entity_mentions, extract_entities, find_entity_mentions, tokens_since_mention,
};
use crate::document::text::truncate_chars;
use crate::document::{Paragraph, Section};

use super::{
    Fix, FixKind, Issue, Location, Rule, RuleChecker, RuleContext, RuleExplanation, RuleScore, as_f64,
    count_by_type, deduct,
};

/// How far back a pronoun-led paragraph looks for an entity.
pub const LOOKBACK_TOKENS: usize = 150;
/// A mention further back than this still resolves, but only just.
pub const FAR_MENTION_TOKENS: usize = 100;
/// Mid-paragraph pronouns per word above which a paragraph is flagged.
pub const PRONOUN_DENSITY_LIMIT: f64 = 0.10;

const UNRESOLVED_PENALTY: f64 = 4.0;
const FAR_PENALTY: f64 = 2.0;
const DENSITY_PENALTY: f64 = 1.0;
const CHAR_RANGE_LEN: usize = 50;
const FALLBACK_ENTITY: &str = "the system";

pub struct EntityPersistence;

impl RuleChecker for EntityPersistence {
    fn rule(&self) -> Rule {
        Rule::EntityPersistence
    }

    fn explain(&self) -> RuleExplanation {
        RuleExplanation::new(
            Rule::EntityPersistence,
            "20 minus 4 per unresolved pronoun opener and 2 per warning; full marks without pronoun openers",
        )
        .threshold("lookback_tokens", LOOKBACK_TOKENS)
        .threshold("far_mention_tokens", FAR_MENTION_TOKENS)
        .threshold("pronoun_density", format!("{:.0}%", PRONOUN_DENSITY_LIMIT * 100.0))
        .error("entity-persistence-start", UNRESOLVED_PENALTY)
        .warning("entity-persistence-far", FAR_PENALTY)
        .warning("entity-persistence-density", DENSITY_PENALTY)
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for section in &ctx.document.sections {
            for paragraph in &section.paragraphs {
                if let Some(pronoun) = ctx.vocabulary.leading_pronoun(&paragraph.text)
                    && let Some(issue) = check_paragraph_start(ctx, section, paragraph, pronoun)
                {
                    issues.push(issue);
                }
                if let Some(issue) = check_pronoun_density(ctx, section, paragraph) {
                    issues.push(issue);
                }
            }
        }
        issues
    }

    fn score(&self, ctx: &RuleContext<'_>, issues: &[Issue]) -> RuleScore {
        let pronoun_starts = ctx
            .document
            .sections
            .iter()
            .flat_map(|section| &section.paragraphs)
            .filter(|paragraph| ctx.vocabulary.starts_with_pronoun(&paragraph.text))
            .count();
        if pronoun_starts == 0 {
            return RuleScore::full(Rule::EntityPersistence)
                .with_detail("pronoun_starts", 0)
                .with_detail("unresolved", 0);
        }

        let (errors, warnings) = count_by_type(Rule::EntityPersistence, issues);
        let score = deduct(
            Rule::EntityPersistence.max_score(),
            &[(errors, UNRESOLVED_PENALTY), (warnings, FAR_PENALTY)],
        );

        RuleScore::new(Rule::EntityPersistence, score, errors + warnings)
            .with_detail("pronoun_starts", pronoun_starts)
            .with_detail("unresolved", errors)
    }
}

fn check_paragraph_start(
    ctx: &RuleContext<'_>,
    section: &Section,
    paragraph: &Paragraph,
    pronoun: &str,
) -> Option<Issue> {
    let window = section.previous_tokens(paragraph.index, LOOKBACK_TOKENS);
    let mentioned = find_entity_mentions(&window.join(" "), ctx.entities);
    let location = Location::paragraph(&section.id, paragraph.index)
        .with_char_range(paragraph.start_char, paragraph.start_char + CHAR_RANGE_LEN);

    if mentioned.is_empty() {
        let fix = suggest_entity(ctx, section, paragraph, pronoun, &[]);
        return Some(
            Issue::error(
                Rule::EntityPersistence,
                format!("entity-persistence-start-{}-{}", section.id, paragraph.index),
                location,
                UNRESOLVED_PENALTY,
                fix,
            )
            .with_message(format!(
                "Paragraph starts with pronoun but no entity mentioned in last {LOOKBACK_TOKENS} tokens"
            ))
            .with_explanation("Chunks lose context. Start with explicit entity name."),
        );
    }

    let distance = tokens_since_mention(&window, ctx.entities).unwrap_or_default();
    if distance <= FAR_MENTION_TOKENS {
        return None;
    }
    let fix = suggest_entity(ctx, section, paragraph, pronoun, &mentioned);
    Some(
        Issue::warning(
            Rule::EntityPersistence,
            format!("entity-persistence-far-{}-{}", section.id, paragraph.index),
            location,
            FAR_PENALTY,
            fix,
        )
        .with_message(format!(
            "Paragraph starts with pronoun; entity last mentioned {distance} tokens ago"
        ))
        .with_explanation("Consider repeating entity name for clarity"),
    )
}

fn check_pronoun_density(
    ctx: &RuleContext<'_>,
    section: &Section,
    paragraph: &Paragraph,
) -> Option<Issue> {
    if paragraph.word_count == 0 {
        return None;
    }
    let pronouns = ctx.vocabulary.mid_paragraph_pronouns(&paragraph.text);
    let mentions = count_entity_mentions(&paragraph.text, ctx.entities);
    let density = as_f64(pronouns.len()) / as_f64(paragraph.word_count);
    if density <= PRONOUN_DENSITY_LIMIT || mentions >= 2 {
        return None;
    }

    let fix = Fix::manual("Replace pronouns with specific entity names").with_instructions(
        format!(
            "Found pronouns: {}",
            pronouns.iter().take(5).copied().collect::<Vec<_>>().join(", ")
        ),
    );
    Some(
        Issue::warning(
            Rule::EntityPersistence,
            format!("entity-persistence-density-{}-{}", section.id, paragraph.index),
            Location::paragraph(&section.id, paragraph.index),
            DENSITY_PENALTY,
            fix,
        )
        .with_message(format!(
            "High pronoun density: {} pronouns, only {mentions} entity mentions",
            pronouns.len()
        ))
        .with_explanation(
            "Replace pronouns with explicit entity names for better chunk self-sufficiency",
        ),
    )
}

/// Replace the leading pronoun with the most likely entity: recent mentions,
/// then entities in the section title, then document entities.
fn suggest_entity(
    ctx: &RuleContext<'_>,
    section: &Section,
    paragraph: &Paragraph,
    pronoun: &str,
    recent: &[&str],
) -> Fix {
    let title_entities = extract_entities(&section.title, &ctx.vocabulary.tables.entity_stop_words);
    let candidates: IndexSet<&str> = recent
        .iter()
        .copied()
        .chain(title_entities.iter().map(String::as_str))
        .chain(ctx.entities.iter().map(String::as_str))
        .collect();
    let top = candidates.first().copied().unwrap_or(FALLBACK_ENTITY);
    let shortlist: Vec<String> = candidates.iter().take(3).map(|c| (*c).to_string()).collect();

    let trimmed = paragraph.text.trim_start();
    let rewritten = format!("{top}{}", trimmed.get(pronoun.len()..).unwrap_or_default());

    Fix::new(
        FixKind::Replace,
        truncate_chars(&rewritten, 100),
        "replaceText",
    )
    .with_instructions(format!(
        "Replace \"{pronoun}\" with \"{top}\" or choose from: {}",
        shortlist.join(", ")
    ))
    .with_candidates(shortlist)
}

#[cfg(test)]
#[path = "entity_persistence_tests.rs"]
mod tests;
