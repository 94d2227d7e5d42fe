//! Word and token counting plus word-boundary matching helpers.

/// Count whitespace-separated words.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated token count: `ceil(words * 1.3)`.
#[must_use]
pub const fn tokens_for_words(words: usize) -> usize {
    (words * 13).div_ceil(10)
}

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    tokens_for_words(count_words(text))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offsets of case-insensitive, word-bounded occurrences of `needle`.
///
/// Boundaries are only enforced on needle edges that are word characters, so
/// symbols such as `%` match anywhere.
fn word_matches(haystack: &str, needle: &str) -> Vec<usize> {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack = haystack.to_lowercase();
    let check_start = needle.chars().next().is_some_and(is_word_char);
    let check_end = needle.chars().next_back().is_some_and(is_word_char);

    let mut found = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = !check_start
            || haystack[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !is_word_char(c));
        let after_ok =
            !check_end || haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            found.push(start);
            from = end;
        } else {
            from = start + needle.chars().next().map_or(1, char::len_utf8);
        }
    }
    found
}

/// Whether `needle` occurs in `haystack` as a whole word (case-insensitive).
#[must_use]
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    !word_matches(haystack, needle).is_empty()
}

/// Number of whole-word occurrences of `needle` in `haystack` (case-insensitive).
#[must_use]
pub fn count_word(haystack: &str, needle: &str) -> usize {
    word_matches(haystack, needle).len()
}

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First `max` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Uppercase the first character.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
