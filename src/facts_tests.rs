use super::*;

#[test]
fn parse_lines_trims_parts_and_numbers_ids() {
    let facts = parse_fact_lines(
        "301 redirect | signals | permanent URL change\n\n  Redirect chains|reduce|link equity  \n",
    );
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].id, "fact-0");
    assert_eq!(facts[0].subject, "301 redirect");
    assert_eq!(facts[0].predicate, "signals");
    assert_eq!(facts[0].object, "permanent URL change");
    assert_eq!(facts[1].id, "fact-1");
    assert_eq!(facts[1].object, "link equity");
}

#[test]
fn parse_lines_skips_lines_without_separator() {
    let facts = parse_fact_lines("just a sentence\nA | is | B");
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].id, "fact-0");
    assert_eq!(facts[0].subject, "A");
}

#[test]
fn missing_parts_become_empty() {
    let fact = Fact::from_line("f", "Only subject |").unwrap();
    assert_eq!(fact.subject, "Only subject");
    assert_eq!(fact.predicate, "");
    assert_eq!(fact.object, "");
}

#[test]
fn structured_list_and_string_entries_normalize_to_one_shape() {
    let input: FactsInput = serde_json::from_str(
        r#"[
            "Sitemap | lists | canonical URLs",
            {"subject": "Googlebot", "predicate": "crawls", "object": "pages", "evidence_text": "Googlebot crawls", "grounded": true},
            {"id": "custom", "entity": "CDN", "relation": "caches", "object": "assets", "evidence_text": ""}
        ]"#,
    )
    .unwrap();
    let facts = input.into_facts();

    assert_eq!(facts.len(), 3);
    assert_eq!(facts[0].id, "fact-0");
    assert_eq!(facts[0].subject, "Sitemap");
    assert_eq!(facts[1].id, "fact-1");
    assert_eq!(facts[1].grounded, Some(true));
    assert!(facts[1].has_evidence());
    assert_eq!(facts[2].id, "custom");
    assert_eq!(facts[2].subject, "CDN");
    assert_eq!(facts[2].predicate, "caches");
    assert_eq!(facts[2].evidence_text, None);
}

#[test]
fn string_input_parses_as_lines() {
    let input: FactsInput = serde_json::from_str(r#""A | b | C\nD | e | F""#).unwrap();
    assert_eq!(input.into_facts().len(), 2);
}

#[test]
fn parse_detects_json_versus_lines() {
    let json = FactsInput::parse(r#"[{"subject": "A", "predicate": "b", "object": "C"}]"#).unwrap();
    assert_eq!(json.into_facts()[0].subject, "A");

    let lines = FactsInput::parse("A | b | C").unwrap();
    assert_eq!(lines.into_facts()[0].object, "C");

    assert!(FactsInput::parse("[not json").is_err());
}

#[test]
fn summary_truncates_long_facts() {
    let fact = Fact::new("f", "A".repeat(40), "is", "B".repeat(40));
    let summary = fact.summary();
    assert!(summary.ends_with("..."));
    assert_eq!(summary.chars().count(), 63);
}
