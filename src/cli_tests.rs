use std::path::PathBuf;

use super::*;

fn check_args(args: &[&str]) -> CheckArgs {
    let cli = Cli::parse_from(args);
    match cli.command {
        Commands::Check(args) => args,
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_requires_files() {
    assert!(Cli::try_parse_from(["croutonizer", "check"]).is_err());
}

#[test]
fn cli_check_with_files() {
    let args = check_args(&["croutonizer", "check", "a.json", "b.json"]);
    assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.key_facts.is_none());
    assert!(!args.strict);
}

#[test]
fn cli_check_with_fact_files() {
    let args = check_args(&[
        "croutonizer",
        "check",
        "a.json",
        "--key-facts",
        "key.txt",
        "--facts",
        "facts.json",
    ]);
    assert_eq!(args.key_facts, Some(PathBuf::from("key.txt")));
    assert_eq!(args.facts, Some(PathBuf::from("facts.json")));
}

#[test]
fn cli_check_with_format_and_output() {
    let args = check_args(&["croutonizer", "check", "a.json", "-f", "sarif", "-o", "out.sarif"]);
    assert_eq!(args.format, OutputFormat::Sarif);
    assert_eq!(args.output, Some(PathBuf::from("out.sarif")));
}

#[test]
fn cli_check_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["croutonizer", "check", "a.json", "--format", "html"]).is_err());
}

#[test]
fn cli_check_gating_flags() {
    let args = check_args(&[
        "croutonizer",
        "check",
        "a.json",
        "--strict",
        "--warn-only",
        "--fail-below",
        "70",
        "--top-fixes",
        "3",
        "-c",
        "custom.toml",
    ]);
    assert!(args.strict);
    assert!(args.warn_only);
    assert_eq!(args.fail_below, Some(70));
    assert_eq!(args.top_fixes, Some(3));
    assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
}

#[test]
fn cli_fail_below_is_a_percentage() {
    assert!(Cli::try_parse_from(["croutonizer", "check", "a.json", "--fail-below", "101"]).is_err());
}

#[test]
fn cli_global_flags() {
    let cli = Cli::parse_from([
        "croutonizer",
        "-vv",
        "--quiet",
        "--color",
        "never",
        "--no-config",
        "explain",
    ]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert_eq!(cli.color, ColorChoice::Never);
    assert!(cli.no_config);
}

#[test]
fn cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["croutonizer", "check", "a.json", "-v", "--color", "always"]);
    assert_eq!(cli.verbose, 1);
    assert_eq!(cli.color, ColorChoice::Always);
}

#[test]
fn cli_explain_rule_and_format() {
    let cli = Cli::parse_from(["croutonizer", "explain", "fact-density", "--format", "json"]);
    match cli.command {
        Commands::Explain(args) => {
            assert_eq!(args.rule.as_deref(), Some("fact-density"));
            assert_eq!(args.format, ExplainFormat::Json);
        }
        _ => panic!("Expected Explain command"),
    }
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["croutonizer", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from(".croutonizer.toml"));
            assert!(!args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn color_choice_maps_to_color_mode() {
    assert_eq!(ColorMode::from(ColorChoice::Auto), ColorMode::Auto);
    assert_eq!(ColorMode::from(ColorChoice::Always), ColorMode::Always);
    assert_eq!(ColorMode::from(ColorChoice::Never), ColorMode::Never);
}
