//! Deserialization types (DTO layer).
//!
//! These types exist solely for serde. They are converted to domain model
//! types via the loader, which is also where regexes are compiled.

use serde::{Deserialize, Serialize};

/// Raw representation of the rule sections of a configuration file.
///
/// The same shape is accepted from TOML (`[[forbidden]]`, `[options]`) and
/// JSON (`{"forbidden": [...], "options": {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfigDto {
    /// Rules whose matches are violations.
    #[serde(default)]
    pub forbidden: Vec<RuleDto>,
    /// Rules whose non-matching edges are violations.
    #[serde(default)]
    pub allowed: Vec<RuleDto>,
    /// Rules that demand at least one matching edge.
    #[serde(default)]
    pub required: Vec<RuleDto>,
    /// Rule evaluation options.
    #[serde(default)]
    pub options: OptionsDto,
}

impl RuleConfigDto {
    /// Returns true if any category declares at least one rule.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        !(self.forbidden.is_empty() && self.allowed.is_empty() && self.required.is_empty())
    }

    /// Total number of declared rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.forbidden.len() + self.allowed.len() + self.required.len()
    }
}

/// `[options]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsDto {
    /// Regexes; matching module paths and edge targets are skipped by all rules.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// One rule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDto {
    /// Rule name (e.g., "no-ui-to-core").
    #[serde(default = "default_rule_name")]
    pub name: String,
    /// Severity keyword (default: "error").
    #[serde(default = "default_severity_str")]
    pub severity: String,
    /// Free-text explanation shown with violations.
    #[serde(default)]
    pub comment: Option<String>,
    /// Source module matcher.
    #[serde(default)]
    pub from: Option<MatcherDto>,
    /// Target module matcher.
    #[serde(default)]
    pub to: Option<MatcherDto>,
    /// Report detected cycles instead of edges.
    #[serde(default)]
    pub circular: bool,
    /// Report modules without any edges instead of edges.
    #[serde(default)]
    pub orphan: bool,
}

/// `{ path = "...", pathNot = "..." }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherDto {
    /// Include regex.
    #[serde(default)]
    pub path: Option<String>,
    /// Exclude regex.
    #[serde(
        default,
        rename = "pathNot",
        alias = "path-not",
        alias = "path_not",
        skip_serializing_if = "Option::is_none"
    )]
    pub path_not: Option<String>,
}

impl MatcherDto {
    /// Returns true if either pattern is set to a non-empty string.
    #[must_use]
    pub fn has_criteria(&self) -> bool {
        let set = |p: &Option<String>| p.as_deref().is_some_and(|s| !s.is_empty());
        set(&self.path) || set(&self.path_not)
    }
}

fn default_rule_name() -> String {
    "unnamed".to_string()
}

fn default_severity_str() -> String {
    "error".to_string()
}
