pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod facts;
pub mod linter;
pub mod output;
pub mod rules;
pub mod scorer;
pub mod vocabulary;

pub use document::{Content, Document, parse_document};
pub use error::{CroutonizerError, Result};
pub use facts::{Fact, FactsInput};
pub use linter::{Linter, Report, Status, run_linter};
pub use rules::{Issue, Rule, RuleScore};
pub use scorer::{DEFAULT_TOP_FIXES, Score, calculate_score};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Parse, lint and score `content` with the built-in vocabulary.
#[must_use]
pub fn analyze(content: &Content) -> Report {
    Linter::default().analyze(content, DEFAULT_TOP_FIXES)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
