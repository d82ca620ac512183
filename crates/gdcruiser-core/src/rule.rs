//! Rule trait for graph-wide dependency checks.

use crate::context::GraphContext;
use crate::types::{RuleCategory, Severity, Violation};

/// A dependency rule evaluated against the whole graph.
///
/// Implementations are selected once when a rule set is compiled (see
/// [`crate::declarative::create_rules`]); evaluation itself never fails.
///
/// # Example
///
/// ```ignore
/// use gdcruiser_core::{GraphContext, GraphRule, RuleCategory, Severity, Violation};
///
/// pub struct NoSelfPreload;
///
/// impl GraphRule for NoSelfPreload {
///     fn name(&self) -> &str { "no-self-preload" }
///     fn category(&self) -> RuleCategory { RuleCategory::Forbidden }
///     fn severity(&self) -> Severity { Severity::Warning }
///
///     fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
///         ctx.candidate_modules()
///             .filter(|m| m.dependencies.iter().any(|d| d.target == m.path))
///             .map(|m| Violation::new(self.name(), self.category(), self.severity(),
///                                     &m.path, "module preloads itself"))
///             .collect()
///     }
/// }
/// ```
pub trait GraphRule: Send + Sync {
    /// Rule name as declared in the configuration.
    fn name(&self) -> &str;

    /// Category the rule was declared in.
    fn category(&self) -> RuleCategory;

    /// Severity assigned to produced violations.
    fn severity(&self) -> Severity;

    /// Evaluates the rule and returns all violations.
    fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed [`GraphRule`] trait objects.
pub type GraphRuleBox = Box<dyn GraphRule>;
