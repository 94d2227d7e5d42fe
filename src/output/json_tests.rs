use super::*;
use crate::output::test_fixtures::{clean_report, failing_report};

fn parse(reports: &[DocumentReport]) -> serde_json::Value {
    let output = JsonFormatter.format(reports).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn documents_keep_input_order() {
    let json = parse(&[failing_report(), clean_report()]);
    let documents = json["documents"].as_array().unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["source"], "docs/failing.json");
    assert_eq!(documents[1]["source"], "clean.json");
}

#[test]
fn score_carries_breakdown_and_status() {
    let json = parse(&[clean_report()]);
    let score = &json["documents"][0]["score"];

    assert_eq!(score["total"], 100);
    assert_eq!(score["status"], "clean");
    assert_eq!(score["blocking_issues"], 0);
    assert_eq!(score["breakdown"]["sectionAnchoring"]["max"], 20.0);
    assert_eq!(score["breakdown"]["factQuality"]["valid_facts"], 1);
}

#[test]
fn document_stats_are_included() {
    let json = parse(&[clean_report()]);
    let stats = &json["documents"][0]["document"];

    assert_eq!(stats["section_count"], 1);
    assert!(stats["total_words"].as_u64().unwrap() > 50);
    assert!(stats["total_tokens"].as_u64().unwrap() > stats["total_words"].as_u64().unwrap());
}

#[test]
fn issues_serialize_with_wire_names() {
    let json = parse(&[failing_report()]);
    let issues = json["documents"][0]["issues"].as_array().unwrap();
    let no_facts = issues
        .iter()
        .find(|issue| issue["id"] == "claim-evidence-no-facts")
        .unwrap();

    assert_eq!(no_facts["rule"], "claimEvidence");
    assert_eq!(no_facts["type"], "error");
    assert_eq!(no_facts["severity"], "blocking");
    assert_eq!(no_facts["fix"]["type"], "suggest");
    assert!(no_facts["score_impact"].as_f64().unwrap() < 0.0);
}

#[test]
fn summary_aggregates_documents() {
    let json = parse(&[clean_report(), failing_report()]);
    let summary = &json["summary"];

    assert_eq!(summary["documents"], 2);
    assert_eq!(summary["clean"], 1);
    assert_eq!(summary["errors"], 1);
    assert!(summary["blocking_issues"].as_u64().unwrap() >= 1);
}

#[test]
fn empty_input_is_valid_json() {
    let json = parse(&[]);
    assert!(json["documents"].as_array().unwrap().is_empty());
    assert_eq!(json["summary"]["documents"], 0);
}
