//! Pure domain model for dependency rules.
//!
//! No serde and no I/O here. Every regex is compiled by the time a
//! [`RuleDef`] exists, so evaluation cannot fail.

use crate::types::{RuleCategory, Severity};

use super::matcher::{Exclusions, PathMatcher};

/// Field-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Rule name is empty.
    #[error("rule name must not be empty")]
    EmptyRuleName,

    /// Regex does not compile.
    #[error("invalid regex pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

/// Evaluation strategy of a rule, fixed when the rule is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleForm {
    /// Match individual edges.
    #[default]
    Plain,
    /// Match detected cycles.
    Circular,
    /// Match modules without incoming or outgoing edges.
    Orphan,
}

/// A validated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    name: String,
    category: RuleCategory,
    severity: Severity,
    comment: Option<String>,
    from: PathMatcher,
    to: PathMatcher,
    form: RuleForm,
}

impl RuleDef {
    /// Creates a plain rule.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyRuleName`] for an empty name.
    pub fn new(
        name: impl Into<String>,
        category: RuleCategory,
        severity: Severity,
        from: PathMatcher,
        to: PathMatcher,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyRuleName);
        }
        Ok(Self {
            name,
            category,
            severity,
            comment: None,
            from,
            to,
            form: RuleForm::Plain,
        })
    }

    /// Sets the evaluation form.
    #[must_use]
    pub fn with_form(mut self, form: RuleForm) -> Self {
        self.form = form;
        self
    }

    /// Attaches a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category the rule was declared in.
    #[must_use]
    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Severity of produced violations.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Free-text comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Source matcher.
    #[must_use]
    pub fn from(&self) -> &PathMatcher {
        &self.from
    }

    /// Target matcher.
    #[must_use]
    pub fn to(&self) -> &PathMatcher {
        &self.to
    }

    /// Evaluation form.
    #[must_use]
    pub fn form(&self) -> RuleForm {
        self.form
    }

    /// Returns true for rules with severity `ignore`.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.severity == Severity::Ignore
    }
}

/// All loaded rules plus global exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    forbidden: Vec<RuleDef>,
    allowed: Vec<RuleDef>,
    required: Vec<RuleDef>,
    exclusions: Exclusions,
}

impl RuleSet {
    /// Creates a rule set.
    #[must_use]
    pub fn new(
        forbidden: Vec<RuleDef>,
        allowed: Vec<RuleDef>,
        required: Vec<RuleDef>,
        exclusions: Exclusions,
    ) -> Self {
        Self {
            forbidden,
            allowed,
            required,
            exclusions,
        }
    }

    /// Forbidden rules in declaration order.
    #[must_use]
    pub fn forbidden(&self) -> &[RuleDef] {
        &self.forbidden
    }

    /// Allowed rules in declaration order.
    #[must_use]
    pub fn allowed(&self) -> &[RuleDef] {
        &self.allowed
    }

    /// Required rules in declaration order.
    #[must_use]
    pub fn required(&self) -> &[RuleDef] {
        &self.required
    }

    /// Global exclusions.
    #[must_use]
    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    /// All rules in evaluation order: forbidden, allowed, required.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDef> + '_ {
        self.forbidden
            .iter()
            .chain(&self.allowed)
            .chain(&self.required)
    }

    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forbidden.len() + self.allowed.len() + self.required.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let result = RuleDef::new(
            "  ",
            RuleCategory::Forbidden,
            Severity::Error,
            PathMatcher::any(),
            PathMatcher::any(),
        );
        assert_eq!(result, Err(ModelError::EmptyRuleName));
    }

    #[test]
    fn iter_follows_category_order() {
        let rule = |name: &str, category| {
            RuleDef::new(name, category, Severity::Error, PathMatcher::any(), PathMatcher::any())
                .unwrap()
        };
        let set = RuleSet::new(
            vec![rule("f", RuleCategory::Forbidden)],
            vec![rule("a", RuleCategory::Allowed)],
            vec![rule("r", RuleCategory::Required)],
            Exclusions::default(),
        );
        let names: Vec<&str> = set.iter().map(RuleDef::name).collect();
        assert_eq!(names, vec!["f", "a", "r"]);
        assert_eq!(set.len(), 3);
    }
}
