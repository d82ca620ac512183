//! Graph rule implementations for declarative rule definitions.

use std::collections::HashSet;

use crate::context::GraphContext;
use crate::rule::GraphRule;
use crate::types::{RuleCategory, Severity, Violation};

use super::model::RuleDef;

macro_rules! delegate_rule_def {
    () => {
        fn name(&self) -> &str {
            self.def.name()
        }

        fn category(&self) -> RuleCategory {
            self.def.category()
        }

        fn severity(&self) -> Severity {
            self.def.severity()
        }
    };
}

fn violation(def: &RuleDef, from: impl Into<String>, message: impl Into<String>) -> Violation {
    Violation::new(def.name(), def.category(), def.severity(), from, message)
        .with_comment(def.comment())
}

// ────────────────────────────────────────────
// Forbidden (plain)
// ────────────────────────────────────────────

/// Flags every edge from a `from` module to a `to` target.
#[derive(Debug, Clone)]
pub struct ForbiddenDependencyRule {
    def: RuleDef,
}

impl ForbiddenDependencyRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(def: RuleDef) -> Self {
        Self { def }
    }
}

impl GraphRule for ForbiddenDependencyRule {
    delegate_rule_def!();

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for module in ctx.candidate_modules() {
            if !self.def.from().matches(&module.path) {
                continue;
            }
            for dep in ctx.candidate_edges(module) {
                if self.def.to().matches(&dep.target) {
                    violations.push(
                        violation(
                            &self.def,
                            &module.path,
                            format!("Forbidden dependency: {} -> {}", module.path, dep.target),
                        )
                        .with_target(&dep.target),
                    );
                }
            }
        }
        violations
    }
}

// ────────────────────────────────────────────
// Forbidden (circular)
// ────────────────────────────────────────────

/// Flags each detected cycle with at least one member matching `from`.
#[derive(Debug, Clone)]
pub struct CircularRule {
    def: RuleDef,
}

impl CircularRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(def: RuleDef) -> Self {
        Self { def }
    }
}

impl GraphRule for CircularRule {
    delegate_rule_def!();

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
        let mut reported: HashSet<Vec<&str>> = HashSet::new();
        let mut violations = Vec::new();

        for cycle in ctx.cycles {
            let matched = cycle
                .members()
                .iter()
                .any(|m| !ctx.exclusions.is_excluded(m) && self.def.from().matches(m));
            if matched && reported.insert(cycle.key()) {
                violations.push(violation(
                    &self.def,
                    cycle.path(),
                    format!("Circular dependency: {}", cycle.chain()),
                ));
            }
        }
        violations
    }
}

// ────────────────────────────────────────────
// Forbidden (orphan)
// ────────────────────────────────────────────

/// Flags modules with neither outgoing nor incoming edges.
///
/// Only the candidate module itself is subject to global exclusions; any
/// edge, excluded or not, keeps a module from being an orphan.
#[derive(Debug, Clone)]
pub struct OrphanRule {
    def: RuleDef,
}

impl OrphanRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(def: RuleDef) -> Self {
        Self { def }
    }
}

impl GraphRule for OrphanRule {
    delegate_rule_def!();

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
        ctx.candidate_modules()
            .filter(|m| self.def.from().matches(&m.path))
            .filter(|m| m.dependencies.is_empty() && !ctx.has_dependents(&m.path))
            .map(|m| violation(&self.def, &m.path, format!("Orphan module: {}", m.path)))
            .collect()
    }
}

// ────────────────────────────────────────────
// Allowed
// ────────────────────────────────────────────

/// Flags edges from `from` modules whose target does not match `to`.
#[derive(Debug, Clone)]
pub struct AllowedRule {
    def: RuleDef,
}

impl AllowedRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(def: RuleDef) -> Self {
        Self { def }
    }
}

impl GraphRule for AllowedRule {
    delegate_rule_def!();

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for module in ctx.candidate_modules() {
            if !self.def.from().matches(&module.path) {
                continue;
            }
            for dep in ctx.candidate_edges(module) {
                if !self.def.to().matches(&dep.target) {
                    violations.push(
                        violation(
                            &self.def,
                            &module.path,
                            format!(
                                "Dependency not in allowed list: {} -> {}",
                                module.path, dep.target
                            ),
                        )
                        .with_target(&dep.target),
                    );
                }
            }
        }
        violations
    }
}

// ────────────────────────────────────────────
// Required
// ────────────────────────────────────────────

/// Flags `from` modules without any edge matching `to`.
///
/// Does nothing when `to` is unconstrained.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    def: RuleDef,
}

impl RequiredRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(def: RuleDef) -> Self {
        Self { def }
    }
}

impl GraphRule for RequiredRule {
    delegate_rule_def!();

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<Violation> {
        let to = self.def.to();
        if to.is_unconstrained() {
            return Vec::new();
        }

        ctx.candidate_modules()
            .filter(|m| self.def.from().matches(&m.path))
            .filter(|m| !ctx.candidate_edges(m).any(|d| to.matches(&d.target)))
            .map(|m| {
                let v = violation(
                    &self.def,
                    &m.path,
                    format!("Missing required dependency matching '{}'", to.describe()),
                );
                match to.include_pattern() {
                    Some(pattern) => v.with_target(pattern),
                    None => v,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::find_cycles;
    use crate::declarative::matcher::{Exclusions, PathMatcher, Pattern};
    use crate::declarative::model::RuleForm;
    use crate::graph::{Dependency, DependencyGraph, DependencyKind, GraphBuilder, Module};

    fn graph(modules: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut builder = GraphBuilder::new();
        for path in modules {
            let deps = edges
                .iter()
                .filter(|(from, _)| from == path)
                .map(|(_, to)| Dependency::by_path(*to, DependencyKind::Preload));
            builder.add_module(Module::new(*path).with_dependencies(deps));
        }
        builder.build()
    }

    fn def(category: RuleCategory, from: Option<&str>, to: Option<&str>) -> RuleDef {
        RuleDef::new(
            "rule",
            category,
            Severity::Error,
            PathMatcher::compile(from, None).unwrap(),
            PathMatcher::compile(to, None).unwrap(),
        )
        .unwrap()
    }

    fn run(rule: &dyn GraphRule, graph: &DependencyGraph, exclusions: &Exclusions) -> Vec<Violation> {
        let cycles = find_cycles(graph);
        rule.check(&GraphContext::new(graph, &cycles, exclusions))
    }

    #[test]
    fn forbidden_flags_matching_edge_only() {
        let g = graph(
            &["res://ui/a.gd", "res://core/b.gd", "res://ui/c.gd"],
            &[
                ("res://ui/a.gd", "res://core/b.gd"),
                ("res://ui/a.gd", "res://ui/c.gd"),
            ],
        );
        let rule = ForbiddenDependencyRule::new(def(
            RuleCategory::Forbidden,
            Some("^res://ui/"),
            Some("^res://core/"),
        ));

        let violations = run(&rule, &g, &Exclusions::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "res://ui/a.gd");
        assert_eq!(violations[0].to.as_deref(), Some("res://core/b.gd"));
        assert_eq!(
            violations[0].message,
            "Forbidden dependency: res://ui/a.gd -> res://core/b.gd"
        );
    }

    #[test]
    fn forbidden_without_to_flags_every_edge() {
        let g = graph(
            &["res://ui/a.gd"],
            &[("res://ui/a.gd", "res://x.gd"), ("res://ui/a.gd", "res://y.gd")],
        );
        let rule = ForbiddenDependencyRule::new(def(RuleCategory::Forbidden, Some("^res://ui/"), None));
        assert_eq!(run(&rule, &g, &Exclusions::default()).len(), 2);
    }

    #[test]
    fn circular_reports_each_cycle_once() {
        let g = graph(
            &["res://a.gd", "res://b.gd"],
            &[("res://a.gd", "res://b.gd"), ("res://b.gd", "res://a.gd")],
        );
        let rule = CircularRule::new(def(RuleCategory::Forbidden, None, None).with_form(RuleForm::Circular));

        let violations = run(&rule, &g, &Exclusions::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "res://a.gd -> res://b.gd");
        assert!(violations[0].to.is_none());
        assert_eq!(
            violations[0].message,
            "Circular dependency: res://a.gd -> res://b.gd -> res://a.gd"
        );
    }

    #[test]
    fn circular_without_cycles_is_silent() {
        let g = graph(&["res://a.gd", "res://b.gd"], &[("res://a.gd", "res://b.gd")]);
        let rule = CircularRule::new(def(RuleCategory::Forbidden, None, None));
        assert!(run(&rule, &g, &Exclusions::default()).is_empty());
    }

    #[test]
    fn orphan_needs_no_edges_either_way() {
        let g = graph(
            &["res://lonely.gd", "res://user.gd", "res://used.gd"],
            &[("res://user.gd", "res://used.gd")],
        );
        let rule = OrphanRule::new(def(RuleCategory::Forbidden, None, None));

        let violations = run(&rule, &g, &Exclusions::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Orphan module: res://lonely.gd");
    }

    #[test]
    fn allowed_flags_non_matching_edges() {
        let g = graph(
            &["res://ui/a.gd"],
            &[("res://ui/a.gd", "res://ui/b.gd"), ("res://ui/a.gd", "res://core/c.gd")],
        );
        let rule = AllowedRule::new(def(RuleCategory::Allowed, Some("^res://ui/"), Some("^res://ui/")));

        let violations = run(&rule, &g, &Exclusions::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to.as_deref(), Some("res://core/c.gd"));
        assert_eq!(violations[0].category, RuleCategory::Allowed);
    }

    #[test]
    fn required_flags_missing_dependency() {
        let g = graph(
            &["res://levels/one.gd", "res://levels/two.gd", "res://levels/level_base.gd"],
            &[("res://levels/one.gd", "res://levels/level_base.gd")],
        );
        let rule = RequiredRule::new(def(
            RuleCategory::Required,
            Some("^res://levels/(one|two)"),
            Some("level_base\\.gd$"),
        ));

        let violations = run(&rule, &g, &Exclusions::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "res://levels/two.gd");
        assert_eq!(violations[0].to.as_deref(), Some("level_base\\.gd$"));
        assert_eq!(
            violations[0].message,
            "Missing required dependency matching 'level_base\\.gd$'"
        );
    }

    #[test]
    fn required_with_unconstrained_to_is_noop() {
        let g = graph(&["res://a.gd"], &[]);
        let rule = RequiredRule::new(def(RuleCategory::Required, None, None));
        assert!(run(&rule, &g, &Exclusions::default()).is_empty());
    }

    #[test]
    fn exclusions_apply_to_sources_and_targets() {
        let g = graph(
            &["res://addons/x.gd", "res://ui/a.gd", "res://core/y.gd"],
            &[
                ("res://addons/x.gd", "res://core/y.gd"),
                ("res://ui/a.gd", "res://addons/x.gd"),
            ],
        );
        let exclusions = Exclusions::new(vec![Pattern::new("^res://addons/").unwrap()]);
        let rule = ForbiddenDependencyRule::new(def(RuleCategory::Forbidden, None, None));

        let violations = run(&rule, &g, &exclusions);
        assert!(violations.is_empty());
    }

    fn addons() -> Exclusions {
        Exclusions::new(vec![Pattern::new("^res://addons/").unwrap()])
    }

    #[test]
    fn orphan_counts_edges_to_and_from_excluded_modules() {
        let g = graph(
            &["res://uses_addon.gd", "res://addons/tool.gd", "res://used_by_addon.gd", "res://addons/idle.gd"],
            &[
                ("res://uses_addon.gd", "res://addons/tool.gd"),
                ("res://addons/tool.gd", "res://used_by_addon.gd"),
            ],
        );
        let rule = OrphanRule::new(def(RuleCategory::Forbidden, None, None));

        assert!(run(&rule, &g, &addons()).is_empty());
    }

    #[test]
    fn circular_ignores_cycles_of_excluded_modules_only() {
        let g = graph(
            &["res://addons/a.gd", "res://addons/b.gd", "res://c.gd", "res://addons/d.gd"],
            &[
                ("res://addons/a.gd", "res://addons/b.gd"),
                ("res://addons/b.gd", "res://addons/a.gd"),
                ("res://c.gd", "res://addons/d.gd"),
                ("res://addons/d.gd", "res://c.gd"),
            ],
        );
        let rule = CircularRule::new(def(RuleCategory::Forbidden, None, None));

        let violations = run(&rule, &g, &addons());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "res://addons/d.gd -> res://c.gd");
    }

    #[test]
    fn allowed_skips_excluded_targets() {
        let g = graph(
            &["res://ui/a.gd"],
            &[("res://ui/a.gd", "res://addons/x.gd"), ("res://ui/a.gd", "res://core/c.gd")],
        );
        let rule = AllowedRule::new(def(RuleCategory::Allowed, Some("^res://ui/"), Some("^res://ui/")));

        let violations = run(&rule, &g, &addons());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to.as_deref(), Some("res://core/c.gd"));
    }

    #[test]
    fn required_is_not_satisfied_by_excluded_target() {
        let g = graph(
            &["res://levels/one.gd", "res://addons/levels/level_base.gd"],
            &[("res://levels/one.gd", "res://addons/levels/level_base.gd")],
        );
        let rule = RequiredRule::new(def(RuleCategory::Required, Some("levels/one"), Some("level_base\\.gd$")));

        let violations = run(&rule, &g, &addons());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "res://levels/one.gd");
    }

    #[test]
    fn required_skips_excluded_sources() {
        let g = graph(&["res://addons/levels/one.gd"], &[]);
        let rule = RequiredRule::new(def(RuleCategory::Required, Some("levels/"), Some("level_base\\.gd$")));
        assert!(run(&rule, &g, &addons()).is_empty());
    }

    #[test]
    fn comment_is_carried() {
        let g = graph(&["res://lonely.gd"], &[]);
        let rule = OrphanRule::new(
            def(RuleCategory::Forbidden, None, None).with_comment(Some("delete it".into())),
        );
        let violations = run(&rule, &g, &Exclusions::default());
        assert_eq!(violations[0].comment.as_deref(), Some("delete it"));
    }
}
