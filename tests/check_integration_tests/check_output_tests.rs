//! Output format tests - text, json, sarif, markdown and file output.

use crate::common::{FILLER_CONTENT, GROUNDED_CONTENT, TestFixture};
use predicates::prelude::*;

#[test]
fn check_text_output_lists_breakdown_and_fixes() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    fixture
        .command()
        .args(["check", "filler.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Score: "))
        .stdout(predicate::str::contains("Claim-Evidence Mapping"))
        .stdout(predicate::str::contains("fix:"))
        .stdout(predicate::str::contains("Top fixes:"))
        .stdout(predicate::str::contains("1 with errors"));
}

#[test]
fn check_verbose_text_output_includes_explanations() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    fixture
        .command()
        .args(["-v", "check", "filler.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Every article needs at least 3 Key Facts",
        ));
}

#[test]
fn check_text_output_has_no_ansi_when_piped() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    fixture
        .command()
        .args(["check", "filler.json"])
        .assert()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn check_color_always_forces_ansi() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    fixture
        .command()
        .args(["--color", "always", "check", "filler.json"])
        .assert()
        .stdout(predicate::str::contains("\u{1b}["));
}

#[test]
fn check_json_output_format() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    let output = fixture
        .command()
        .args(["check", "--format", "json", "filler.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let document = &json["documents"][0];
    assert_eq!(document["source"], "filler.json");
    assert_eq!(document["score"]["status"], "errors");
    assert!(document["score"]["blocking_issues"].as_u64().unwrap() >= 1);
    assert_eq!(
        document["score"]["breakdown"]["claimEvidence"]["score"],
        serde_json::json!(0.0)
    );
    assert!(
        document["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|issue| issue["id"] == "claim-evidence-no-facts")
    );
    assert_eq!(json["summary"]["documents"], 1);
    assert_eq!(json["summary"]["errors"], 1);
}

#[test]
fn check_json_total_is_sum_of_breakdown() {
    let fixture = TestFixture::new();
    fixture.create_file("article.json", GROUNDED_CONTENT);

    let output = fixture
        .command()
        .args(["check", "--format", "json", "article.json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let score = &json["documents"][0]["score"];

    let sum: f64 = score["breakdown"]
        .as_object()
        .unwrap()
        .values()
        .map(|rule| rule["score"].as_f64().unwrap())
        .sum();
    let total = score["total"].as_f64().unwrap();
    assert_eq!(total, sum.round().clamp(0.0, 100.0), "breakdown sum {sum}");
    assert!(total <= 100.0);
}

#[test]
fn check_top_fixes_limits_ranked_fixes() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    let output = fixture
        .command()
        .args(["check", "--format", "json", "--top-fixes", "1", "filler.json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let top_fixes = json["documents"][0]["score"]["top_fixes"].as_array().unwrap();
    assert_eq!(top_fixes.len(), 1);
}

#[test]
fn check_sarif_output_format() {
    let fixture = TestFixture::new();
    fixture.create_file("filler.json", FILLER_CONTENT);

    fixture
        .command()
        .args(["check", "--format", "sarif", "filler.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""))
        .stdout(predicate::str::contains("\"name\": \"croutonizer\""))
        .stdout(predicate::str::contains("\"ruleId\": \"claim-evidence\""))
        .stdout(predicate::str::contains("\"level\": \"error\""));
}

#[test]
fn check_markdown_output_format() {
    let fixture = TestFixture::new();
    fixture.create_file("article.json", GROUNDED_CONTENT);

    fixture
        .command()
        .args(["check", "--format", "markdown", "article.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Croutonizer Report"))
        .stdout(predicate::str::contains("| Rule | Score | Max | Issues |"));
}

#[test]
fn check_unknown_format_is_rejected() {
    let fixture = TestFixture::new();
    fixture.create_file("article.json", GROUNDED_CONTENT);

    fixture
        .command()
        .args(["check", "--format", "html", "article.json"])
        .assert()
        .code(2);
}

#[test]
fn check_output_file_receives_report() {
    let fixture = TestFixture::new();
    fixture.create_file("article.json", GROUNDED_CONTENT);

    fixture
        .command()
        .args([
            "check",
            "--format",
            "json",
            "--output",
            "reports/result.json",
            "article.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fixture.read("reports/result.json");
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["documents"][0]["source"], "article.json");
}
