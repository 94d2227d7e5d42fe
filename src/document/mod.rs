//! Document model and the parser that builds it from raw content.

mod content;
pub mod entities;
mod model;
mod parser;
pub mod text;

pub use content::{Content, ContentSection};
pub use entities::extract_entities;
pub use model::{ANSWER_BOX_ID, Document, DocumentMetadata, Paragraph, Section};
pub use parser::{
    DocumentParser, SUMMARY_MAX_WORDS, SUMMARY_MIN_WORDS, parse_document, parse_paragraphs,
};
