use std::fmt::Write;

use crate::cli::{Cli, ExplainArgs, ExplainFormat};
use crate::error::CroutonizerError;
use crate::rules::{Rule, RuleExplanation};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::report_error;

#[must_use]
pub fn run_explain(args: &ExplainArgs, cli: &Cli) -> i32 {
    match run_explain_impl(args) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            report_error(&e, cli.color.into());
            EXIT_CONFIG_ERROR
        }
    }
}

pub(crate) fn run_explain_impl(args: &ExplainArgs) -> crate::Result<String> {
    let rules = select_rules(args.rule.as_deref())?;
    let explanations: Vec<RuleExplanation> = rules
        .into_iter()
        .map(|rule| rule.checker().explain())
        .collect();

    match args.format {
        ExplainFormat::Text => Ok(format_text(&explanations)),
        ExplainFormat::Json => Ok(serde_json::to_string_pretty(&explanations)? + "\n"),
    }
}

fn select_rules(name: Option<&str>) -> crate::Result<Vec<Rule>> {
    let Some(name) = name else {
        return Ok(Rule::ALL.to_vec());
    };
    Rule::from_name(name).map(|rule| vec![rule]).ok_or_else(|| {
        let known: Vec<&str> = Rule::ALL.iter().map(|rule| rule.slug()).collect();
        CroutonizerError::Config(format!(
            "Unknown rule '{name}'. Expected one of: {}",
            known.join(", ")
        ))
    })
}

pub(crate) fn format_text(explanations: &[RuleExplanation]) -> String {
    let mut output = String::new();

    for exp in explanations {
        let _ = writeln!(output, "{} ({}) - {} points", exp.title, exp.slug, exp.max_score);
        let _ = writeln!(output, "  {}", exp.description);
        let _ = writeln!(output, "  Scoring: {}", exp.scoring);

        let _ = writeln!(output, "  Thresholds:");
        for threshold in &exp.thresholds {
            let _ = writeln!(output, "    {:<26} {}", threshold.name, threshold.value);
        }

        let _ = writeln!(output, "  Penalties:");
        for penalty in &exp.penalties {
            let kind = if penalty.blocking {
                "blocking error"
            } else {
                penalty.issue_type.as_str()
            };
            let _ = writeln!(
                output,
                "    {:<32} {:<15} -{}",
                penalty.issue, kind, penalty.points
            );
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
#[path = "explain_tests.rs"]
mod tests;
