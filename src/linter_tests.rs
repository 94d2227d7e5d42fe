use super::*;
use crate::document::{Content, parse_document};
use crate::rules::{Fix, Location};

fn issue(rule: Rule, id: &str, blocking: bool) -> Issue {
    let location = Location::document();
    if blocking {
        Issue::error(rule, id, location, 1.0, Fix::manual("fix"))
    } else {
        Issue::warning(rule, id, location, 1.0, Fix::manual("fix"))
    }
}

fn sample_document() -> Document {
    parse_document(
        &Content::new("Redirect Guide for Googlebot")
            .with_answer_box("Search Console reports every redirect chain it finds.")
            .with_section("Overview", "It matters.\n\nThis helps.")
            .with_section("Summary", "Redirects pass signals."),
    )
}

#[test]
fn entities_come_from_title_answer_box_and_first_section() {
    let document = parse_document(
        &Content::new("Redirect Guide")
            .with_answer_box("Search Console reports chains.")
            .with_section("First", "Googlebot follows them.")
            .with_section("Second", "Bingbot is ignored here."),
    );
    let entities = document_entities(&document, &["The", "This"]);

    assert_eq!(
        entities,
        vec!["Redirect Guide", "Search Console", "Googlebot"]
    );
}

#[test]
fn entities_are_deduplicated() {
    let document = parse_document(
        &Content::new("Googlebot").with_section("Crawling", "Googlebot crawls daily."),
    );
    assert_eq!(document_entities(&document, &["The"]), vec!["Googlebot"]);
}

#[test]
fn empty_document_has_no_entities() {
    let document = parse_document(&Content::default());
    assert!(document_entities(&document, &["The"]).is_empty());
}

#[test]
fn issues_are_merged_in_rule_order() {
    let issues = run_linter(&sample_document(), &[]);
    let order: Vec<usize> = issues
        .iter()
        .map(|issue| Rule::ALL.iter().position(|rule| *rule == issue.rule).unwrap_or(99))
        .collect();

    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(order, sorted);
    assert!(issues.iter().any(|issue| issue.rule == Rule::ClaimEvidence));
    assert!(issues.iter().any(|issue| issue.rule == Rule::HeaderSpecificity));
}

#[test]
fn linting_is_idempotent() {
    let document = sample_document();
    let first = run_linter(&document, &[]);
    let second = run_linter(&document, &[]);
    assert_eq!(first, second);
}

#[test]
fn grouping_keeps_every_rule() {
    let issues = vec![
        issue(Rule::FactQuality, "a", true),
        issue(Rule::SectionAnchoring, "b", false),
        issue(Rule::FactQuality, "c", false),
    ];
    let grouped = group_issues_by_rule(&issues);

    assert_eq!(grouped.len(), 6);
    assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), Rule::ALL.to_vec());
    assert_eq!(grouped[&Rule::FactQuality].len(), 2);
    assert_eq!(grouped[&Rule::SectionAnchoring][0].id, "b");
    assert!(grouped[&Rule::ClaimEvidence].is_empty());
}

#[test]
fn blocking_issues_are_errors_only() {
    let issues = vec![
        issue(Rule::ClaimEvidence, "a", true),
        issue(Rule::ClaimEvidence, "b", false),
    ];
    let blocking = blocking_issues(&issues);
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].id, "a");
}

#[test]
fn status_reflects_worst_issue() {
    assert_eq!(determine_status(&[]), Status::Clean);
    assert_eq!(
        determine_status(&[issue(Rule::FactDensity, "w", false)]),
        Status::Warnings
    );
    assert_eq!(
        determine_status(&[
            issue(Rule::FactDensity, "w", false),
            issue(Rule::ClaimEvidence, "e", true),
        ]),
        Status::Errors
    );
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Status::Warnings).unwrap(), "warnings");
    assert_eq!(Status::Errors.to_string(), "errors");
}

#[test]
fn from_config_uses_overridden_vocabulary() {
    let mut config = Config::default();
    config.vocabulary.summary_marker = "TL;DR:".to_string();
    let linter = Linter::from_config(&config).unwrap();
    assert_eq!(linter.vocabulary().tables.summary_marker, "TL;DR:");
}

#[test]
fn from_config_rejects_invalid_vibe_pattern() {
    let mut config = Config::default();
    config.vocabulary.vibe_claims = vec![crate::vocabulary::VibeClaim {
        trigger: "(unclosed".to_string(),
        unless: None,
    }];
    let err = Linter::from_config(&config).err().unwrap();
    assert!(matches!(err, crate::error::CroutonizerError::InvalidPattern { .. }));
}
