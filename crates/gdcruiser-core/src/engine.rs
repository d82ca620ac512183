//! Rule evaluation over a frozen graph.

use tracing::{debug, info};

use crate::context::GraphContext;
use crate::cycles::Cycle;
use crate::declarative::create_rules;
use crate::declarative::matcher::Exclusions;
use crate::declarative::model::RuleSet;
use crate::graph::DependencyGraph;
use crate::rule::{GraphRule, GraphRuleBox};
use crate::types::CheckResult;

/// Evaluates a compiled list of graph rules.
pub struct RuleEngine {
    rules: Vec<GraphRuleBox>,
    exclusions: Exclusions,
}

impl RuleEngine {
    /// Compiles `set` into graph rules. Ignored rules are dropped.
    #[must_use]
    pub fn new(set: &RuleSet) -> Self {
        Self {
            rules: create_rules(set),
            exclusions: set.exclusions().clone(),
        }
    }

    /// Adds a custom rule after the configured ones.
    #[must_use]
    pub fn rule<R: GraphRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules that will be evaluated.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs every rule in order and collects the violations.
    #[must_use]
    pub fn check(&self, graph: &DependencyGraph, cycles: &[Cycle]) -> CheckResult {
        let ctx = GraphContext::new(graph, cycles, &self.exclusions);
        let mut result = CheckResult::new();

        for rule in &self.rules {
            let violations = rule.check(&ctx);
            debug!(
                rule = rule.name(),
                category = %rule.category(),
                violations = violations.len(),
                "rule evaluated"
            );
            result.violations.extend(violations);
            result.rules_checked += 1;
        }

        let (errors, warnings, infos) = result.count_by_severity();
        info!(
            "checked {} rules: {} errors, {} warnings, {} info",
            result.rules_checked, errors, warnings, infos
        );
        result
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("exclusions", &self.exclusions)
            .finish()
    }
}

/// Evaluates `set` against `graph` and the cycles detected on it.
///
/// Order: forbidden rules, then allowed, then required, each in declaration
/// order. Rules with severity `ignore` produce nothing.
#[must_use]
pub fn evaluate(set: &RuleSet, graph: &DependencyGraph, cycles: &[Cycle]) -> CheckResult {
    RuleEngine::new(set).check(graph, cycles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GraphContext;
    use crate::declarative::load_rules_from_toml;
    use crate::graph::{Dependency, DependencyKind, GraphBuilder, Module};
    use crate::types::{RuleCategory, Severity, Violation};

    fn sample_graph() -> DependencyGraph {
        let mut builder = GraphBuilder::new();
        builder.add_module(
            Module::new("res://ui/hud.gd")
                .with_dependency(Dependency::by_path("res://core/game.gd", DependencyKind::Preload)),
        );
        builder.add_module(Module::new("res://core/game.gd"));
        builder.build()
    }

    #[test]
    fn ignored_rules_are_not_counted() {
        let set = load_rules_from_toml(
            r#"
[[forbidden]]
name = "muted"
severity = "ignore"
from = { path = "^res://ui/" }

[[forbidden]]
name = "active"
severity = "warning"
from = { path = "^res://ui/" }
"#,
        )
        .unwrap();

        let result = evaluate(&set, &sample_graph(), &[]);
        assert_eq!(result.rules_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule, "active");
        assert!(!result.has_errors());
    }

    struct EveryModule;

    impl GraphRule for EveryModule {
        fn name(&self) -> &str {
            "every-module"
        }

        fn category(&self) -> RuleCategory {
            RuleCategory::Forbidden
        }

        fn severity(&self) -> Severity {
            Severity::Info
        }

        fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
            ctx.candidate_modules()
                .map(|m| Violation::new(self.name(), self.category(), self.severity(), &m.path, "seen"))
                .collect()
        }
    }

    #[test]
    fn custom_rules_run_after_configured_ones() {
        let engine = RuleEngine::new(&RuleSet::default()).rule(EveryModule);
        assert_eq!(engine.rule_count(), 1);

        let result = engine.check(&sample_graph(), &[]);
        assert_eq!(result.info_count(), 2);
    }
}
