//! How each rule spends its points, as shown by `croutonizer explain`.

use serde::Serialize;

use super::{IssueType, Rule};

/// A named limit a rule checks against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub name: &'static str,
    pub value: String,
}

/// The declared cost of one kind of issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Penalty {
    /// Issue id prefix, e.g. `section-anchor-pronoun`.
    pub issue: &'static str,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub blocking: bool,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleExplanation {
    pub rule: Rule,
    pub slug: &'static str,
    pub title: &'static str,
    pub max_score: f64,
    pub description: &'static str,
    /// How issues turn into the rule score.
    pub scoring: &'static str,
    pub thresholds: Vec<Threshold>,
    pub penalties: Vec<Penalty>,
}

impl RuleExplanation {
    #[must_use]
    pub fn new(rule: Rule, scoring: &'static str) -> Self {
        Self {
            rule,
            slug: rule.slug(),
            title: rule.title(),
            max_score: rule.max_score(),
            description: rule.description(),
            scoring,
            thresholds: Vec::new(),
            penalties: Vec::new(),
        }
    }

    #[must_use]
    pub fn threshold(mut self, name: &'static str, value: impl ToString) -> Self {
        self.thresholds.push(Threshold {
            name,
            value: value.to_string(),
        });
        self
    }

    /// A blocking error costing `points`.
    #[must_use]
    pub fn error(mut self, issue: &'static str, points: f64) -> Self {
        self.penalties.push(Penalty {
            issue,
            issue_type: IssueType::Error,
            blocking: true,
            points,
        });
        self
    }

    #[must_use]
    pub fn warning(mut self, issue: &'static str, points: f64) -> Self {
        self.penalties.push(Penalty {
            issue,
            issue_type: IssueType::Warning,
            blocking: false,
            points,
        });
        self
    }
}
