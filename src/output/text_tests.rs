use super::*;
use crate::output::test_fixtures::{clean_report, failing_report};

#[test]
fn clean_document_shows_full_breakdown() {
    let output = TextFormatter::with_colors(false)
        .format(&[clean_report()])
        .unwrap();

    assert!(output.contains("clean.json"));
    assert!(output.contains("Score: 100/100 (clean)"));
    assert!(output.contains("Section Anchoring"));
    assert!(output.contains("Fact Quality"));
    assert!(!output.contains("Top fixes"));
}

#[test]
fn issues_use_error_and_warning_icons() {
    let output = TextFormatter::with_colors(false)
        .format(&[failing_report()])
        .unwrap();

    assert!(output.contains("(errors)"));
    assert!(output.contains("✗ [claim-evidence] No Key Facts defined"));
    assert!(output.contains("⚠"));
    assert!(output.contains("impact: -"));
}

#[test]
fn top_fixes_are_numbered() {
    let output = TextFormatter::with_colors(false)
        .format(&[failing_report()])
        .unwrap();

    assert!(output.contains("Top fixes:"));
    assert!(output.contains("     1. (+"));
}

#[test]
fn explanations_only_in_verbose_mode() {
    let reports = [failing_report()];
    let explanation = "Every article needs at least 3 Key Facts for LLM citations";

    let quiet = TextFormatter::with_colors(false).format(&reports).unwrap();
    assert!(!quiet.contains(explanation));

    let verbose = TextFormatter::with_colors(false)
        .with_verbose(1)
        .format(&reports)
        .unwrap();
    assert!(verbose.contains(explanation));
}

#[test]
fn summary_counts_each_status() {
    let output = TextFormatter::with_colors(false)
        .format(&[clean_report(), failing_report()])
        .unwrap();

    assert!(output.contains("Summary: 2 documents checked, 1 clean, 0 with warnings, 1 with errors"));
}

#[test]
fn colors_wrap_status_when_enabled() {
    let output = TextFormatter::with_colors(true)
        .format(&[failing_report()])
        .unwrap();
    assert!(output.contains("\x1b[31merrors\x1b[0m"));

    let plain = TextFormatter::with_colors(false)
        .format(&[failing_report()])
        .unwrap();
    assert!(!plain.contains('\x1b'));
}

#[test]
fn empty_input_still_prints_summary() {
    let output = TextFormatter::with_colors(false).format(&[]).unwrap();
    assert!(output.contains("Summary: 0 documents checked"));
    assert!(output.contains("average score 0.0"));
}
