//! Core types for rule violations and check results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a rule and of the violations it produces.
///
/// `Ignore` sorts lowest; rules carrying it are skipped entirely.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The rule is switched off and never reports.
    Ignore,
    /// Informational message, does not fail the check.
    Info,
    /// Warning that should be addressed.
    #[serde(alias = "warn")]
    Warning,
    /// Error that must be fixed.
    #[default]
    Error,
}

impl Severity {
    /// Parses a severity keyword as written in configuration files.
    ///
    /// Accepts `warn` as a synonym for `warning`. Matching is case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "ignore" => Some(Self::Ignore),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The list a rule was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Matching edges, cycles or orphans are violations.
    Forbidden,
    /// Edges that do *not* match the target are violations.
    Allowed,
    /// Absence of a matching edge is a violation.
    Required,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => write!(f, "forbidden"),
            Self::Allowed => write!(f, "allowed"),
            Self::Required => write!(f, "required"),
        }
    }
}

/// A rule violation found during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the rule that produced this violation.
    pub rule: String,
    /// Category of the originating rule.
    pub category: RuleCategory,
    /// Severity inherited from the rule.
    pub severity: Severity,
    /// Offending module path (or the member chain for a cycle).
    pub from: String,
    /// Offending dependency target, when the violation concerns one edge.
    pub to: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Free-text comment copied from the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Violation {
    /// Creates a new violation without a target.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        category: RuleCategory,
        severity: Severity,
        from: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            category,
            severity,
            from: from.into(),
            to: None,
            message: message.into(),
            comment: None,
        }
    }

    /// Sets the dependency target of this violation.
    #[must_use]
    pub fn with_target(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Attaches the rule comment to this violation.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<&str>) -> Self {
        self.comment = comment.map(str::to_string);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.rule, self.message)
    }
}

/// Result of evaluating a rule set against a dependency graph.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// All violations found, grouped by rule in evaluation order.
    pub violations: Vec<Violation>,
    /// Number of rules that were evaluated (ignored rules excluded).
    pub rules_checked: usize,
}

impl CheckResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity >= Severity::Warning)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Counts violations by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        (self.error_count(), self.warning_count(), self.info_count())
    }

    /// Number of error-severity violations.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.by_severity(Severity::Error).len()
    }

    /// Number of warning-severity violations.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.by_severity(Severity::Warning).len()
    }

    /// Number of info-severity violations.
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.by_severity(Severity::Info).len()
    }

    /// Groups violations by rule name, keeping first-occurrence order.
    #[must_use]
    pub fn grouped_by_rule(&self) -> Vec<(&str, Vec<&Violation>)> {
        let mut groups: Vec<(&str, Vec<&Violation>)> = Vec::new();
        for v in &self.violations {
            match groups.iter_mut().find(|(name, _)| *name == v.rule) {
                Some((_, members)) => members.push(v),
                None => groups.push((v.rule.as_str(), vec![v])),
            }
        }
        groups
    }
}
