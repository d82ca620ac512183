//! Whole-configuration validation that reports every problem at once.
//!
//! [`super::loader::load`] stops at the first error; this module is used by
//! `gdcruiser validate` to list all errors and warnings with their field paths.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::types::{RuleCategory, Severity};

use super::config_dto::{MatcherDto, RuleConfigDto, RuleDto};

/// One finding, located by field path (e.g. `forbidden[2].from.path`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Field path of the offending value.
    pub path: String,
    /// Description of the problem.
    pub message: String,
}

impl Issue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors and warnings found in a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that prevent the configuration from loading.
    pub errors: Vec<Issue>,
    /// Suspicious but loadable settings.
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    /// Returns true if there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Issue::new(path, message));
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Issue::new(path, message));
    }
}

/// Validates every rule and option of `config`.
#[must_use]
pub fn validate(config: &RuleConfigDto) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (category, rules) in [
        (RuleCategory::Forbidden, &config.forbidden),
        (RuleCategory::Allowed, &config.allowed),
        (RuleCategory::Required, &config.required),
    ] {
        let mut seen = HashSet::new();
        for (i, rule) in rules.iter().enumerate() {
            let path = format!("{category}[{i}]");
            validate_rule(rule, category, &path, &mut report);
            if !rule.name.is_empty() && !seen.insert(rule.name.as_str()) {
                report.warning(
                    format!("{path}.name"),
                    format!("duplicate rule name '{}' in {category}", rule.name),
                );
            }
        }
    }

    for (i, pattern) in config.options.exclude.iter().enumerate() {
        validate_regex(pattern, &format!("options.exclude[{i}]"), &mut report);
    }

    report
}

fn validate_rule(rule: &RuleDto, category: RuleCategory, path: &str, report: &mut ValidationReport) {
    if rule.name.trim().is_empty() {
        report.error(format!("{path}.name"), "rule must have a name");
    }

    if Severity::parse(&rule.severity).is_none() {
        report.error(
            format!("{path}.severity"),
            format!(
                "unknown severity '{}', expected error, warning, warn, info or ignore",
                rule.severity
            ),
        );
    }

    if let Some(from) = &rule.from {
        validate_matcher(from, &format!("{path}.from"), report);
    }
    if let Some(to) = &rule.to {
        validate_matcher(to, &format!("{path}.to"), report);
    }

    let has_from = rule.from.as_ref().is_some_and(MatcherDto::has_criteria);
    let has_to = rule.to.as_ref().is_some_and(MatcherDto::has_criteria);
    let has_flags = rule.circular || rule.orphan;

    match category {
        RuleCategory::Forbidden => {
            if !has_from && !has_to && !has_flags {
                report.warning(
                    path,
                    "rule has no matching criteria and will flag every dependency",
                );
            }
            if rule.circular && rule.orphan {
                report.warning(path, "both `circular` and `orphan` are set; `circular` is used");
            }
        }
        RuleCategory::Allowed | RuleCategory::Required => {
            if has_flags {
                report.warning(
                    path,
                    format!("`circular` and `orphan` only apply to forbidden rules; ignored in {category}"),
                );
            }
            if category == RuleCategory::Required && !has_to {
                report.warning(
                    format!("{path}.to"),
                    "required rule without a `to` pattern can never be violated",
                );
            } else if !has_from && !has_to {
                report.warning(path, "rule has no matching criteria");
            }
        }
    }
}

fn validate_matcher(matcher: &MatcherDto, path: &str, report: &mut ValidationReport) {
    if let Some(pattern) = matcher.path.as_deref().filter(|p| !p.is_empty()) {
        validate_regex(pattern, &format!("{path}.path"), report);
    }
    if let Some(pattern) = matcher.path_not.as_deref().filter(|p| !p.is_empty()) {
        validate_regex(pattern, &format!("{path}.pathNot"), report);
    }
}

fn validate_regex(pattern: &str, path: &str, report: &mut ValidationReport) {
    if let Err(e) = Regex::new(pattern) {
        report.error(path, format!("invalid regex pattern '{pattern}': {e}"));
    }
}
