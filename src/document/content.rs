use serde::{Deserialize, Deserializer};

use crate::facts::FactsInput;

/// One `{heading, content}` entry of the caller's content.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContentSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentSection {
    #[must_use]
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            content: Some(content.into()),
        }
    }
}

/// Raw article content as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, rename = "answerBox", alias = "answer_box")]
    pub answer_box: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<ContentSection>,
    #[serde(default, rename = "keyFacts", alias = "key_facts")]
    pub key_facts: Option<FactsInput>,
    /// Extracted facts to attach to the document.
    #[serde(default)]
    pub facts: Option<FactsInput>,
}

impl Content {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_answer_box(mut self, answer_box: impl Into<String>) -> Self {
        self.answer_box = Some(answer_box.into());
        self
    }

    #[must_use]
    pub fn with_section(mut self, heading: impl Into<String>, content: impl Into<String>) -> Self {
        self.sections.push(ContentSection::new(heading, content));
        self
    }

    #[must_use]
    pub fn with_key_facts(mut self, key_facts: FactsInput) -> Self {
        self.key_facts = Some(key_facts);
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
