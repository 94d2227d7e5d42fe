use super::*;

#[test]
fn defaults_match_built_in_behaviour() {
    let config = Config::default();
    assert!(config.version.is_none());
    assert!(!config.check.strict);
    assert_eq!(config.check.top_fixes, 5);
    assert!(config.check.fail_below.is_none());
    assert_eq!(config.vocabulary, Vocabulary::default());
}

#[test]
fn empty_document_deserializes_to_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn check_section_fields_are_optional() {
    let config: Config = toml::from_str(
        r"
[check]
fail_below = 70
",
    )
    .unwrap();
    assert_eq!(config.check.fail_below, Some(70));
    assert_eq!(config.check.top_fixes, 5);
    assert!(!config.check.strict);
}

#[test]
fn vocabulary_override_replaces_only_named_tables() {
    let config: Config = toml::from_str(
        r#"
[vocabulary]
generic_headers = ["intro", "wrap-up"]
summary_marker = "TL;DR:"
"#,
    )
    .unwrap();

    assert_eq!(config.vocabulary.generic_headers, vec!["intro", "wrap-up"]);
    assert_eq!(config.vocabulary.summary_marker, "TL;DR:");
    assert_eq!(
        config.vocabulary.hedge_words,
        Vocabulary::default().hedge_words
    );
}

#[test]
fn vibe_claims_deserialize_as_trigger_unless_pairs() {
    let config: Config = toml::from_str(
        r#"
[[vocabulary.vibe_claims]]
trigger = '\bseamless\b'

[[vocabulary.vibe_claims]]
trigger = '\bfaster\b'
unless = '^\s+than\b'
"#,
    )
    .unwrap();

    let claims = &config.vocabulary.vibe_claims;
    assert_eq!(claims.len(), 2);
    assert!(claims[0].unless.is_none());
    assert_eq!(claims[1].unless.as_deref(), Some(r"^\s+than\b"));
}

#[test]
fn negative_fail_below_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[check]\nfail_below = -1\n");
    assert!(result.is_err());
}
