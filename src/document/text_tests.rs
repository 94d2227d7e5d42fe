use super::*;

#[test]
fn count_words_ignores_repeated_whitespace() {
    assert_eq!(count_words("  one   two\n\nthree\t"), 3);
    assert_eq!(count_words(""), 0);
    assert_eq!(count_words("   \n "), 0);
}

#[test]
fn token_estimate_rounds_up() {
    assert_eq!(tokens_for_words(0), 0);
    assert_eq!(tokens_for_words(1), 2);
    assert_eq!(tokens_for_words(10), 13);
    assert_eq!(tokens_for_words(500), 650);
    assert_eq!(tokens_for_words(539), 701);
    assert_eq!(estimate_tokens("a b c"), 4);
}

#[test]
fn contains_word_respects_boundaries() {
    assert!(contains_word("The data layer", "data"));
    assert!(!contains_word("The database layer", "data"));
    assert!(contains_word("Best practices apply", "best practices"));
    assert!(contains_word("SETUP guide", "setup"));
}

#[test]
fn contains_word_finds_later_bounded_occurrence() {
    assert!(contains_word("metadata and data", "data"));
}

#[test]
fn count_word_counts_non_overlapping_matches() {
    assert_eq!(count_word("may may maybe May", "may"), 3);
    assert_eq!(count_word("", "may"), 0);
    assert_eq!(count_word("anything", ""), 0);
}

#[test]
fn symbol_needles_match_without_boundaries() {
    assert!(contains_word("grew 40%", "%"));
}

#[test]
fn truncate_chars_appends_ellipsis_only_when_cut() {
    assert_eq!(truncate_chars("short", 10), "short");
    assert_eq!(truncate_chars("abcdefghij", 4), "abcd...");
    assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
}

#[test]
fn capitalize_first_handles_empty() {
    assert_eq!(capitalize_first(""), "");
    assert_eq!(capitalize_first("key redirect guide"), "Key redirect guide");
}
