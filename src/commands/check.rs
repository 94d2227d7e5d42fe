use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::cli::{CheckArgs, Cli};
use crate::config::CheckConfig;
use crate::document::Content;
use crate::error::{CroutonizerError, Result};
use crate::facts::FactsInput;
use crate::linter::{Linter, Status};
use crate::output::{DocumentReport, ErrorOutput};
use crate::{EXIT_CONFIG_ERROR, EXIT_ISSUES_FOUND, EXIT_SUCCESS};

use super::context::{load_config, report_error, write_output};

/// Fact lists given on the command line, replacing each file's own.
#[derive(Debug, Clone, Default)]
pub(crate) struct FactOverrides {
    pub key_facts: Option<FactsInput>,
    pub facts: Option<FactsInput>,
}

impl FactOverrides {
    fn apply(&self, content: &mut Content) {
        if let Some(key_facts) = &self.key_facts {
            content.key_facts = Some(key_facts.clone());
        }
        if let Some(facts) = &self.facts {
            content.facts = Some(facts.clone());
        }
    }
}

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            report_error(&e, cli.color.into());
            EXIT_CONFIG_ERROR
        }
    }
}

pub(crate) fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_cli_overrides(&mut config.check, args);
    let linter = Linter::from_config(&config)?;

    let overrides = FactOverrides {
        key_facts: args.key_facts.as_deref().map(read_facts).transpose()?,
        facts: args.facts.as_deref().map(read_facts).transpose()?,
    };

    let reports = analyze_files(&linter, &args.files, &overrides, config.check.top_fixes)?;

    let formatter = args.format.formatter(cli.color.into(), cli.verbose);
    let output = formatter
        .format(&reports)
        .map_err(|e| CroutonizerError::Analysis {
            operation: "format report",
            message: e.to_string(),
        })?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if args.warn_only {
        if !cli.quiet && (config.check.strict || config.check.fail_below.is_some()) {
            ErrorOutput::new(cli.color.into()).print_warning_with_detail(
                "--warn-only is set, so strict mode and fail_below do not affect the exit code",
                None,
                Some("Drop --warn-only to enforce them"),
            );
        }
        return Ok(EXIT_SUCCESS);
    }
    Ok(exit_code(&reports, &config.check))
}

pub(crate) fn apply_cli_overrides(check: &mut CheckConfig, args: &CheckArgs) {
    if args.strict {
        check.strict = true;
    }
    if let Some(fail_below) = args.fail_below {
        check.fail_below = Some(fail_below);
    }
    if let Some(top_fixes) = args.top_fixes {
        check.top_fixes = top_fixes;
    }
}

/// Analyse every file in parallel. Reports keep argument order.
pub(crate) fn analyze_files<P: AsRef<Path> + Sync>(
    linter: &Linter,
    files: &[P],
    overrides: &FactOverrides,
    top_fixes: usize,
) -> Result<Vec<DocumentReport>> {
    files
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let mut content = read_content(path)?;
            overrides.apply(&mut content);

            let report = linter.analyze(&content, top_fixes);
            tracing::info!(
                path = %path.display(),
                total = report.score.total,
                status = %report.score.status,
                issues = report.issues.len(),
                "document analyzed"
            );
            Ok(DocumentReport::new(path.display().to_string(), report))
        })
        .collect()
}

pub(crate) fn read_content(path: &Path) -> Result<Content> {
    let text = fs::read_to_string(path).map_err(|source| CroutonizerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CroutonizerError::InvalidContent {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_facts(path: &Path) -> Result<FactsInput> {
    let text = fs::read_to_string(path).map_err(|source| CroutonizerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    FactsInput::parse(&text)
}

/// Exit code for a completed run, honouring `strict` and `fail_below`.
pub(crate) fn exit_code(reports: &[DocumentReport], check: &CheckConfig) -> i32 {
    let statuses = || reports.iter().map(|entry| entry.report.score.status);

    let has_errors = statuses().any(|status| status == Status::Errors);
    let strict_failure = check.strict && statuses().any(|status| status == Status::Warnings);
    let below_threshold = check.fail_below.is_some_and(|minimum| {
        reports
            .iter()
            .any(|entry| entry.report.score.total < minimum)
    });

    if has_errors || strict_failure || below_threshold {
        EXIT_ISSUES_FOUND
    } else {
        EXIT_SUCCESS
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
