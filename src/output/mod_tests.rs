use super::*;
use crate::output::test_fixtures::{clean_report, failing_report};

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
    assert_eq!(
        "markdown".parse::<OutputFormat>().unwrap(),
        OutputFormat::Markdown
    );
    assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
}

#[test]
fn output_format_unknown() {
    let err = "html".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err, "Unknown output format: html");
}

#[test]
fn explicit_color_modes_ignore_terminal() {
    assert!(ColorMode::Always.use_colors(false));
    assert!(!ColorMode::Never.use_colors(true));
    assert!(!ColorMode::Auto.use_colors(false));
}

#[test]
fn every_format_renders_the_same_reports() {
    let reports = [clean_report(), failing_report()];
    for format in [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Sarif,
        OutputFormat::Markdown,
    ] {
        let output = format.formatter(ColorMode::Never, 0).format(&reports).unwrap();
        assert!(output.contains("failing.json"), "{format:?} lost the source");
    }
}

#[test]
fn summary_counts_statuses_and_averages_scores() {
    let clean = clean_report();
    let failing = failing_report();
    let expected = (f64::from(clean.report.score.total) + f64::from(failing.report.score.total)) / 2.0;

    let summary = Summary::from_reports(&[clean, failing]);

    assert_eq!(summary.documents, 2);
    assert_eq!(summary.clean, 1);
    assert_eq!(summary.warnings, 0);
    assert_eq!(summary.errors, 1);
    assert!(summary.blocking_issues >= 1);
    assert!((summary.average_score - (expected * 10.0).round() / 10.0).abs() < f64::EPSILON);
}

#[test]
fn summary_of_nothing_is_zero() {
    let summary = Summary::from_reports(&[]);
    assert_eq!(summary.documents, 0);
    assert!(summary.average_score.abs() < f64::EPSILON);
}
