use serde::{Deserialize, Serialize};

use crate::scorer::DEFAULT_TOP_FIXES;
use crate::vocabulary::Vocabulary;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Settings for `croutonizer check` [check].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckConfig {
    /// Treat warnings as failures.
    #[serde(default)]
    pub strict: bool,

    /// Number of ranked fixes carried by each score.
    #[serde(default = "default_top_fixes")]
    pub top_fixes: usize,

    /// Fail when a document's total score is below this value.
    #[serde(default)]
    pub fail_below: Option<u8>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            strict: false,
            top_fixes: default_top_fixes(),
            fail_below: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Config format version; absent means the current version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub check: CheckConfig,

    /// Heuristic table overrides; any table left out keeps its built-in value.
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

const fn default_top_fixes() -> usize {
    DEFAULT_TOP_FIXES
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
