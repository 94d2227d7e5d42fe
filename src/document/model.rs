use serde::Serialize;

use crate::facts::Fact;

/// Id given to the answer-box section.
pub const ANSWER_BOX_ID: &str = "answer-box";

/// A blank-line separated block of section text.
///
/// `start_char`/`end_char` are byte offsets into the owning section's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
    pub word_count: usize,
    pub token_count: usize,
    pub start_char: usize,
    pub end_char: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub level: u8,
    pub title: String,
    pub text: String,
    pub paragraphs: Vec<Paragraph>,
    pub word_count: usize,
    pub token_count: usize,
    pub has_summary: bool,
    #[serde(rename = "isAnswerBox")]
    pub is_answer_box: bool,
}

impl Section {
    #[must_use]
    pub fn last_paragraph(&self) -> Option<&Paragraph> {
        self.paragraphs.last()
    }

    /// Index of the final paragraph (0 for a section without paragraphs).
    #[must_use]
    pub const fn last_paragraph_index(&self) -> usize {
        self.paragraphs.len().saturating_sub(1)
    }

    /// The trailing `limit` whitespace tokens of the paragraphs before `paragraph_index`.
    #[must_use]
    pub fn previous_tokens(&self, paragraph_index: usize, limit: usize) -> Vec<&str> {
        let tokens: Vec<&str> = self
            .paragraphs
            .iter()
            .take(paragraph_index)
            .flat_map(|p| p.text.split_whitespace())
            .collect();
        let skip = tokens.len().saturating_sub(limit);
        tokens[skip..].to_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    pub total_words: usize,
    pub total_tokens: usize,
    pub section_count: usize,
}

/// Annotated document model built once per analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
    pub facts: Vec<Fact>,
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Attach extracted facts before linting.
    #[must_use]
    pub fn with_facts(mut self, facts: Vec<Fact>) -> Self {
        self.facts = facts;
        self
    }

    #[must_use]
    pub fn answer_box(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_answer_box)
    }

    /// Sections other than the answer box, in document order.
    pub fn regular_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_answer_box)
    }

    #[must_use]
    pub fn first_regular_section(&self) -> Option<&Section> {
        self.regular_sections().next()
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Trailing tokens before a paragraph, within its own section.
    #[must_use]
    pub fn previous_tokens(&self, section_id: &str, paragraph_index: usize, limit: usize) -> Vec<&str> {
        self.section(section_id)
            .map(|s| s.previous_tokens(paragraph_index, limit))
            .unwrap_or_default()
    }
}
