use super::*;

#[test]
fn default_vocabulary_compiles() {
    let vocab = Vocabulary::default().compile();
    assert!(vocab.is_ok());
}

#[test]
fn leading_pronoun_is_case_insensitive() {
    let vocab = CompiledVocabulary::default();
    assert_eq!(vocab.leading_pronoun("They said so."), Some("They"));
    assert_eq!(vocab.leading_pronoun("  its value"), Some("its"));
    assert!(vocab.starts_with_pronoun("THERE is more"));
}

#[test]
fn leading_pronoun_requires_word_boundary() {
    let vocab = CompiledVocabulary::default();
    assert!(!vocab.starts_with_pronoun("Items are listed"));
    assert!(!vocab.starts_with_pronoun("Thesis statements matter"));
    assert!(!vocab.starts_with_pronoun("Google indexes pages"));
}

#[test]
fn mid_paragraph_pronouns_collects_all_occurrences() {
    let vocab = CompiledVocabulary::default();
    let found = vocab.mid_paragraph_pronouns("It works because they said it would.");
    assert_eq!(found, vec!["It", "they", "it"]);
}

#[test]
fn fact_pronouns_include_personal_pronouns() {
    let vocab = CompiledVocabulary::default();
    assert!(vocab.has_fact_pronoun("her website"));
    assert!(!vocab.has_fact_pronoun("301 redirect"));
}

#[test]
fn vibe_claim_skipped_when_quantified() {
    let vocab = CompiledVocabulary::default();
    assert!(vocab.vibe_claims("Caching improves by 40 percent").is_empty());
    assert_eq!(vocab.vibe_claims("Caching improves speed"), vec!["improves"]);
}

#[test]
fn vibe_claim_finds_later_unqualified_occurrence() {
    let vocab = CompiledVocabulary::default();
    let found = vocab.vibe_claims("It helps by 20% and later helps everyone");
    assert_eq!(found, vec!["helps"]);
}

#[test]
fn vibe_claims_one_match_per_pattern() {
    let vocab = CompiledVocabulary::default();
    let found = vocab.vibe_claims("A powerful and robust tool that is better and better");
    assert_eq!(found, vec!["better", "powerful", "robust"]);
}

#[test]
fn invalid_vibe_pattern_is_reported() {
    let vocab = Vocabulary {
        vibe_claims: vec![VibeClaim {
            trigger: "(unclosed".to_string(),
            unless: None,
        }],
        ..Vocabulary::default()
    };
    let err = vocab.compile().unwrap_err();
    assert!(matches!(err, CroutonizerError::InvalidPattern { .. }));
}

#[test]
fn empty_pronoun_list_never_matches() {
    let vocab = Vocabulary {
        pronoun_starters: Vec::new(),
        ..Vocabulary::default()
    }
    .compile()
    .unwrap();
    assert!(!vocab.starts_with_pronoun("It is here"));
}

#[test]
fn vocabulary_fields_default_when_missing_from_toml() {
    let vocab: Vocabulary = toml::from_str(r#"hedge_words = ["maybe"]"#).unwrap();
    assert_eq!(vocab.hedge_words, vec!["maybe".to_string()]);
    assert_eq!(vocab.summary_marker, SUMMARY_MARKER);
    assert_eq!(vocab.generic_headers.len(), GENERIC_HEADERS.len());
}
