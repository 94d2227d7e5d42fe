use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CroutonizerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content file: {path}")]
    InvalidContent {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid vocabulary pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{operation} failed: {message}")]
    Analysis {
        operation: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CroutonizerError {
    /// Short category label used by the error printer.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::FileRead { .. } | Self::Io(_) => "IO",
            Self::InvalidContent { .. } | Self::Json(_) => "Input",
            Self::InvalidPattern { .. } => "Vocabulary",
            Self::Analysis { .. } => "Analysis",
        }
    }

    /// Actionable hint shown under the error, when one exists.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidContent { .. } => Some(
                "Content files are JSON objects with `title`, optional `answerBox`, \
                 `sections: [{heading, content}]` and optional `keyFacts`",
            ),
            Self::InvalidPattern { .. } => {
                Some("Check the [vocabulary] regexes in your configuration file")
            }
            Self::TomlParse(_) => Some("Run `croutonizer init --force` to regenerate a valid file"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CroutonizerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
