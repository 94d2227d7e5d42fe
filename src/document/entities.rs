//! Capitalized-phrase entity heuristics.

use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

use super::text::count_word;

static ENTITY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn entity_pattern() -> &'static Regex {
    ENTITY_PATTERN.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid regex")
    })
}

/// Runs of capitalized words ("Google Search Console"), deduplicated in
/// first-seen order, minus the stop words.
#[must_use]
pub fn extract_entities<S: AsRef<str>>(text: &str, stop_words: &[S]) -> Vec<String> {
    let found: IndexSet<&str> = entity_pattern()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    found
        .into_iter()
        .filter(|entity| !stop_words.iter().any(|stop| stop.as_ref() == *entity))
        .map(str::to_string)
        .collect()
}

/// Entities that appear anywhere in `text` (case-insensitive substring).
#[must_use]
pub fn find_entity_mentions<'e>(text: &str, entities: &'e [String]) -> Vec<&'e str> {
    let lower = text.to_lowercase();
    entities
        .iter()
        .filter(|entity| lower.contains(&entity.to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// Total whole-word occurrences of all entities in `text`.
#[must_use]
pub fn count_entity_mentions(text: &str, entities: &[String]) -> usize {
    entities.iter().map(|entity| count_word(text, entity)).sum()
}

/// Distance in tokens from the end of `tokens` back to the most recent entity
/// mention, or `None` when no entity is mentioned.
#[must_use]
pub fn tokens_since_mention(tokens: &[&str], entities: &[String]) -> Option<usize> {
    if tokens.is_empty() || entities.is_empty() {
        return None;
    }
    let window = tokens.join(" ").to_lowercase();
    entities
        .iter()
        .filter_map(|entity| window.rfind(&entity.to_lowercase()))
        .max()
        .map(|offset| {
            let token_index = window[..offset].matches(' ').count();
            tokens.len() - token_index
        })
}

#[cfg(test)]
#[path = "entities_tests.rs"]
mod tests;
