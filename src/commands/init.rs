use std::fs;

use crate::cli::{Cli, InitArgs};
use crate::error::CroutonizerError;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::report_error;

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args) {
        Ok(()) => {
            if !cli.quiet {
                println!("Created configuration file: {}", args.output.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            report_error(&e, cli.color.into());
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes the default configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(CroutonizerError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;
    tracing::debug!(path = %output_path.display(), "wrote config template");
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# croutonizer configuration file
version = "1"

[check]
# Treat warnings as failures (exit code 1)
strict = false

# Ranked fixes reported per document
top_fixes = 5

# Fail when a document's total score is below this value (0-100)
# fail_below = 70

# Heuristic word lists. Each key replaces the built-in list entirely;
# omit a key to keep the default. See `croutonizer explain` for thresholds.
[vocabulary]
# Phrase that opens a section's anchor summary
# summary_marker = "Crouton Summary:"

# Headers treated as generic placeholders
# generic_headers = ["introduction", "overview", "conclusion", "summary", "faq"]

# Words that mark a sentence as hedged
# hedge_words = ["can", "may", "might", "could", "possibly", "potentially"]

# Verbs too vague to carry a fact on their own
# vague_predicates = ["helps", "improves", "affects", "supports"]

# Unquantified claims; `unless` skips matches followed by a measurable qualifier
# [[vocabulary.vibe_claims]]
# trigger = '\bfaster\b'
# unless = '^\s+(?:than|by)\b'
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
