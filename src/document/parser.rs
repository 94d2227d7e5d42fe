use std::sync::OnceLock;

use regex::Regex;

use crate::vocabulary::SUMMARY_MARKER;

use super::content::Content;
use super::model::{ANSWER_BOX_ID, Document, DocumentMetadata, Paragraph, Section};
use super::text::{count_words, tokens_for_words};

/// Word-count band of a summary-shaped closing paragraph.
pub const SUMMARY_MIN_WORDS: usize = 12;
pub const SUMMARY_MAX_WORDS: usize = 35;

static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
static CAPITALIZED_WORD: OnceLock<Regex> = OnceLock::new();

fn paragraph_break() -> &'static Regex {
    PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"))
}

fn capitalized_word() -> &'static Regex {
    CAPITALIZED_WORD.get_or_init(|| Regex::new(r"[A-Z][a-z]+").expect("valid regex"))
}

/// Builds a [`Document`] from raw [`Content`].
///
/// Parsing is total: missing or empty input yields a document with no
/// sections and zero counts.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    summary_marker: String,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(SUMMARY_MARKER)
    }
}

impl DocumentParser {
    #[must_use]
    pub fn new(summary_marker: impl Into<String>) -> Self {
        Self {
            summary_marker: summary_marker.into(),
        }
    }

    #[must_use]
    pub fn parse(&self, content: &Content) -> Document {
        let mut sections = Vec::with_capacity(content.sections.len() + 1);

        if let Some(answer_box) = content.answer_box.as_deref()
            && !answer_box.is_empty()
        {
            sections.push(self.parse_section(ANSWER_BOX_ID, 1, "Answer Box", answer_box, true));
        }

        for (idx, entry) in content.sections.iter().enumerate() {
            let (Some(heading), Some(text)) = (entry.heading.as_deref(), entry.content.as_deref())
            else {
                continue;
            };
            if heading.is_empty() || text.is_empty() {
                continue;
            }
            let id = format!("section-{idx}");
            sections.push(self.parse_section(&id, 2, heading, text, false));
        }

        let metadata = DocumentMetadata {
            total_words: sections.iter().map(|s| s.word_count).sum(),
            total_tokens: sections.iter().map(|s| s.token_count).sum(),
            section_count: sections.len(),
        };

        tracing::debug!(
            sections = metadata.section_count,
            words = metadata.total_words,
            "parsed document"
        );

        Document {
            title: content.title.clone(),
            sections,
            facts: Vec::new(),
            metadata,
        }
    }

    #[must_use]
    pub fn parse_section(
        &self,
        id: &str,
        level: u8,
        title: &str,
        text: &str,
        is_answer_box: bool,
    ) -> Section {
        let paragraphs = parse_paragraphs(text);
        let word_count = count_words(text);
        let has_summary = self.detect_summary(&paragraphs);

        Section {
            id: id.to_string(),
            level,
            title: title.to_string(),
            text: text.to_string(),
            paragraphs,
            word_count,
            token_count: tokens_for_words(word_count),
            has_summary,
            is_answer_box,
        }
    }

    /// Whether the final paragraph is an anchor summary: explicitly marked, or
    /// 12-35 words with at least one capitalized word.
    #[must_use]
    pub fn detect_summary(&self, paragraphs: &[Paragraph]) -> bool {
        let Some(last) = paragraphs.last() else {
            return false;
        };
        if last.text.starts_with(&self.summary_marker) {
            return true;
        }
        (SUMMARY_MIN_WORDS..=SUMMARY_MAX_WORDS).contains(&last.word_count)
            && capitalized_word().is_match(&last.text)
    }

    #[must_use]
    pub fn summary_marker(&self) -> &str {
        &self.summary_marker
    }
}

/// Split text on blank lines into located paragraphs.
///
/// Offsets are searched for in the original text from the previous paragraph's
/// end, so ranges are monotonic and never overlap.
#[must_use]
pub fn parse_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut offset = 0;

    for fragment in paragraph_break().split(text) {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            continue;
        }
        let start = text
            .get(offset..)
            .and_then(|rest| rest.find(trimmed))
            .map_or(offset, |pos| offset + pos);
        let end = start + trimmed.len();
        let word_count = count_words(trimmed);

        paragraphs.push(Paragraph {
            index: paragraphs.len(),
            text: trimmed.to_string(),
            word_count,
            token_count: tokens_for_words(word_count),
            start_char: start,
            end_char: end,
        });
        offset = end;
    }

    paragraphs
}

/// Parse content with the default summary marker.
#[must_use]
pub fn parse_document(content: &Content) -> Document {
    DocumentParser::default().parse(content)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
