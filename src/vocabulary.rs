//! Heuristic keyword and pattern tables.
//!
//! Every list the rules consult lives here as a named constant. The tables are
//! gathered into a [`Vocabulary`] that can be overridden from the `[vocabulary]`
//! section of the configuration file, and compiled once into a
//! [`CompiledVocabulary`] before linting.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CroutonizerError, Result};

/// Words that make a paragraph "pronoun-led" when they open it.
pub const PRONOUN_STARTERS: &[&str] = &[
    "it", "this", "that", "these", "those", "they", "their", "its", "them", "such", "here", "there",
];

/// Pronouns counted inside a paragraph for the density check.
pub const MID_PARAGRAPH_PRONOUNS: &[&str] = &[
    "it", "this", "that", "these", "those", "they", "their", "its", "them",
];

/// Pronouns that must not appear inside an anchor summary.
pub const SUMMARY_PRONOUNS: &[&str] = &["it", "this", "that", "these", "those"];

/// Pronouns that must not appear in a fact's subject or object.
pub const FACT_PRONOUNS: &[&str] = &[
    "it", "this", "that", "these", "those", "they", "them", "their", "he", "she", "his", "her",
];

/// Capitalized words that are never treated as entities.
pub const ENTITY_STOP_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "When", "Where", "Why", "How",
];

/// Explicit prefix that marks a paragraph as an anchor summary.
pub const SUMMARY_MARKER: &str = "Crouton Summary:";

pub const SUMMARY_VAGUE_WORDS: &[&str] = &["helps", "improves", "better", "good", "important"];

/// Verbs used to draft an anchor summary for a section that lacks one.
pub const ACTION_WORDS: &[&str] = &[
    "defines", "explains", "describes", "provides", "enables", "requires", "supports",
    "implements", "handles", "processes", "manages", "controls", "validates", "generates",
];

pub const BRIDGING_PHRASES: &[&str] = &[
    "as mentioned earlier",
    "as discussed above",
    "this applies to",
    "returning to",
    "building on",
    "as stated in",
];

/// Title fragments that mark the last section as a conclusion.
pub const CONCLUSION_TITLES: &[&str] = &["conclusion", "summary", "takeaway", "bottom line", "final"];

/// Headers that say nothing about the section (matched against the whole title).
pub const GENERIC_HEADERS: &[&str] = &[
    "overview",
    "introduction",
    "conclusion",
    "summary",
    "the bottom line",
    "pricing",
    "benefits",
    "faq",
    "features",
    "about",
    "details",
    "more",
    "background",
];

pub const TOPIC_KEYWORDS: &[&str] = &[
    "redirect", "canonical", "indexing", "crawling", "sitemap", "schema", "structured data", "meta",
    "robots", "seo", "http", "https", "ssl", "tls", "dns", "cdn", "301", "302", "404", "500",
    "status code", "link equity", "pagerank", "backlink", "anchor text", "keyword", "serp",
    "ranking", "organic", "algorithm", "google", "bing", "search engine", "crawler", "bot",
];

pub const QUALIFIERS: &[&str] = &[
    "permanent", "temporary", "automatic", "manual", "best", "worst", "common", "rare", "typical",
    "advanced", "basic", "simple", "complex", "fast", "slow", "efficient", "optimal", "correct",
    "incorrect", "proper", "improper", "during", "after", "before", "while", "migration",
    "implementation", "configuration", "setup",
];

pub const VAGUE_NOUNS: &[&str] = &[
    "things", "stuff", "details", "information", "data", "aspects", "elements", "factors", "points",
    "items",
];

/// Activity nouns used when drafting a replacement header.
pub const HEADER_ACTIONS: &[&str] = &[
    "implementation", "configuration", "setup", "migration", "optimization", "troubleshooting",
    "monitoring", "testing", "analysis", "comparison", "integration", "deployment",
];

/// Use-case phrases used when drafting a replacement header.
pub const HEADER_CONTEXTS: &[&str] = &[
    "SEO",
    "site migration",
    "URL changes",
    "search engines",
    "web development",
    "best practices",
    "performance",
    "user experience",
    "ranking",
    "indexing",
];

pub const HEDGE_WORDS: &[&str] = &[
    "can", "may", "might", "could", "would", "should", "often", "usually", "generally",
    "typically", "sometimes", "possibly", "probably", "likely", "perhaps", "potentially",
];

/// Unquantified claim triggers, each paired with the continuation that makes it measurable.
pub const VIBE_CLAIMS: &[(&str, Option<&str>)] = &[
    (
        r"\b(?:better|improves?|helps?|enhances?)\b",
        Some(r"^\s+(?:by|to|than|with)\s+\d"),
    ),
    (r"\bpowerful\b", Some(r"^\s+(?:than|as)\b")),
    (r"\brobust\b", Some(r"^\s+against")),
    (r"\beffective\b", Some(r"^\s+(?:at|for|in)\s+\w+ing")),
    (r"\bimportant\b", Some(r"^\s+(?:because|for|to)\b")),
    (r"\buseful\b", Some(r"^\s+(?:for|when|because)\b")),
];

/// Predicates that only carry meaning with a measurable object.
pub const VAGUE_PREDICATES: &[&str] = &[
    "helps", "improves", "supports", "enhances", "enables", "provides", "offers", "gives", "allows",
    "facilitates",
];

/// Words in a fact object that make a vague predicate measurable.
pub const MEASURE_WORDS: &[&str] = &["by", "to", "than", "percent", "%", "x", "times", "ratio"];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// A vague-claim trigger and the continuation that exempts it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VibeClaim {
    pub trigger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
}

/// The full set of heuristic tables, overridable per field from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Vocabulary {
    pub pronoun_starters: Vec<String>,
    pub mid_paragraph_pronouns: Vec<String>,
    pub summary_pronouns: Vec<String>,
    pub fact_pronouns: Vec<String>,
    pub entity_stop_words: Vec<String>,
    pub summary_marker: String,
    pub summary_vague_words: Vec<String>,
    pub action_words: Vec<String>,
    pub bridging_phrases: Vec<String>,
    pub conclusion_titles: Vec<String>,
    pub generic_headers: Vec<String>,
    pub topic_keywords: Vec<String>,
    pub qualifiers: Vec<String>,
    pub vague_nouns: Vec<String>,
    pub header_actions: Vec<String>,
    pub header_contexts: Vec<String>,
    pub hedge_words: Vec<String>,
    pub vibe_claims: Vec<VibeClaim>,
    pub vague_predicates: Vec<String>,
    pub measure_words: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            pronoun_starters: owned(PRONOUN_STARTERS),
            mid_paragraph_pronouns: owned(MID_PARAGRAPH_PRONOUNS),
            summary_pronouns: owned(SUMMARY_PRONOUNS),
            fact_pronouns: owned(FACT_PRONOUNS),
            entity_stop_words: owned(ENTITY_STOP_WORDS),
            summary_marker: SUMMARY_MARKER.to_string(),
            summary_vague_words: owned(SUMMARY_VAGUE_WORDS),
            action_words: owned(ACTION_WORDS),
            bridging_phrases: owned(BRIDGING_PHRASES),
            conclusion_titles: owned(CONCLUSION_TITLES),
            generic_headers: owned(GENERIC_HEADERS),
            topic_keywords: owned(TOPIC_KEYWORDS),
            qualifiers: owned(QUALIFIERS),
            vague_nouns: owned(VAGUE_NOUNS),
            header_actions: owned(HEADER_ACTIONS),
            header_contexts: owned(HEADER_CONTEXTS),
            hedge_words: owned(HEDGE_WORDS),
            vibe_claims: VIBE_CLAIMS
                .iter()
                .map(|(trigger, unless)| VibeClaim {
                    trigger: (*trigger).to_string(),
                    unless: unless.map(str::to_string),
                })
                .collect(),
            vague_predicates: owned(VAGUE_PREDICATES),
            measure_words: owned(MEASURE_WORDS),
        }
    }
}

impl Vocabulary {
    /// Compile the pattern-backed tables.
    ///
    /// # Errors
    /// Returns [`CroutonizerError::InvalidPattern`] if a vague-claim regex does not compile.
    pub fn compile(self) -> Result<CompiledVocabulary> {
        let pronoun_start = word_set_regex(&self.pronoun_starters, "^(?:", r")\b")?;
        let mid_pronouns = word_set_regex(&self.mid_paragraph_pronouns, r"\b(?:", r")\b")?;
        let summary_pronouns = word_set_regex(&self.summary_pronouns, r"\b(?:", r")\b")?;
        let fact_pronouns = word_set_regex(&self.fact_pronouns, r"\b(?:", r")\b")?;
        let vibe_claims = self
            .vibe_claims
            .iter()
            .map(CompiledVibeClaim::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledVocabulary {
            pronoun_start,
            mid_pronouns,
            summary_pronouns,
            fact_pronouns,
            vibe_claims,
            tables: self,
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| CroutonizerError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Case-insensitive alternation over literal words. An empty list never matches.
fn word_set_regex(words: &[String], prefix: &str, suffix: &str) -> Result<Regex> {
    if words.is_empty() {
        return compile_pattern(r"[^\s\S]");
    }
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    compile_pattern(&format!("(?i){prefix}{alternation}{suffix}"))
}

#[derive(Debug, Clone)]
pub struct CompiledVibeClaim {
    trigger: Regex,
    unless: Option<Regex>,
}

impl CompiledVibeClaim {
    fn new(claim: &VibeClaim) -> Result<Self> {
        Ok(Self {
            trigger: compile_pattern(&format!("(?i){}", claim.trigger))?,
            unless: claim
                .unless
                .as_deref()
                .map(|u| compile_pattern(&format!("(?i){u}")))
                .transpose()?,
        })
    }

    /// First trigger occurrence not followed by its exempting continuation.
    #[must_use]
    pub fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.trigger
            .find_iter(text)
            .find(|m| {
                self.unless
                    .as_ref()
                    .is_none_or(|unless| !unless.is_match(&text[m.end()..]))
            })
            .map(|m| m.as_str())
    }
}

/// Vocabulary tables together with their compiled regexes.
#[derive(Debug, Clone)]
pub struct CompiledVocabulary {
    pub tables: Vocabulary,
    pronoun_start: Regex,
    mid_pronouns: Regex,
    summary_pronouns: Regex,
    fact_pronouns: Regex,
    vibe_claims: Vec<CompiledVibeClaim>,
}

impl Default for CompiledVocabulary {
    fn default() -> Self {
        // The built-in tables are literal words and known-good patterns.
        Vocabulary::default()
            .compile()
            .unwrap_or_else(|e| unreachable!("built-in vocabulary failed to compile: {e}"))
    }
}

impl CompiledVocabulary {
    /// The pronoun that opens `text`, if any.
    #[must_use]
    pub fn leading_pronoun<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pronoun_start.find(text.trim_start()).map(|m| m.as_str())
    }

    #[must_use]
    pub fn starts_with_pronoun(&self, text: &str) -> bool {
        self.leading_pronoun(text).is_some()
    }

    #[must_use]
    pub fn mid_paragraph_pronouns<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.mid_pronouns.find_iter(text).map(|m| m.as_str()).collect()
    }

    #[must_use]
    pub fn summary_pronouns<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.summary_pronouns
            .find_iter(text)
            .map(|m| m.as_str())
            .collect()
    }

    #[must_use]
    pub fn has_fact_pronoun(&self, text: &str) -> bool {
        self.fact_pronouns.is_match(text)
    }

    /// One matched phrase per vague-claim pattern that fires in `text`.
    #[must_use]
    pub fn vibe_claims<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.vibe_claims
            .iter()
            .filter_map(|claim| claim.first_match(text))
            .collect()
    }
}

#[cfg(test)]
#[path = "vocabulary_tests.rs"]
mod tests;
