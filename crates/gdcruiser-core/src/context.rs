//! Evaluation context shared by all graph rules.

use crate::cycles::Cycle;
use crate::declarative::matcher::Exclusions;
use crate::graph::{Dependency, DependencyGraph, Module};

/// Everything a rule can look at during one evaluation run.
#[derive(Debug, Clone, Copy)]
pub struct GraphContext<'a> {
    /// The frozen dependency graph.
    pub graph: &'a DependencyGraph,
    /// Cycles detected on `graph`; empty when detection was skipped.
    pub cycles: &'a [Cycle],
    /// Global exclusions.
    pub exclusions: &'a Exclusions,
}

impl<'a> GraphContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(graph: &'a DependencyGraph, cycles: &'a [Cycle], exclusions: &'a Exclusions) -> Self {
        Self {
            graph,
            cycles,
            exclusions,
        }
    }

    /// Modules that are not excluded, sorted by path.
    pub fn candidate_modules(&self) -> impl Iterator<Item = &'a Module> + 'a {
        let exclusions = self.exclusions;
        self.graph
            .all_modules()
            .filter(move |m| !exclusions.is_excluded(&m.path))
    }

    /// Outgoing edges of `module` whose target is not excluded.
    pub fn candidate_edges(&self, module: &'a Module) -> impl Iterator<Item = &'a Dependency> + 'a {
        let exclusions = self.exclusions;
        module
            .dependencies
            .iter()
            .filter(move |d| !exclusions.is_excluded(&d.target))
    }

    /// Returns true if any module, excluded or not, depends on `path`.
    #[must_use]
    pub fn has_dependents(&self, path: &str) -> bool {
        !self.graph.dependents_of(path).is_empty()
    }
}
