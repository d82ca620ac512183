//! One analysis run: resolve, freeze, detect cycles.

use tracing::info;

use crate::cycles::{find_cycles, Cycle};
use crate::declarative::model::RuleSet;
use crate::engine::evaluate;
use crate::graph::{DependencyGraph, GraphBuilder};
use crate::types::CheckResult;

/// The frozen graph and the cycles found on it.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Completed graph.
    pub graph: DependencyGraph,
    /// Detected cycles; empty when detection was skipped.
    pub cycles: Vec<Cycle>,
    /// Whether cycle detection ran.
    pub cycles_detected: bool,
}

impl Analysis {
    /// Resolves type names, freezes the graph and optionally detects cycles.
    #[must_use]
    pub fn run(builder: GraphBuilder, detect_cycles: bool) -> Self {
        let graph = builder.build();
        let cycles = if detect_cycles {
            find_cycles(&graph)
        } else {
            Vec::new()
        };

        info!(
            "analyzed {} modules, {} dependencies, {} cycles",
            graph.module_count(),
            graph.edge_count(),
            cycles.len()
        );

        Self {
            graph,
            cycles,
            cycles_detected: detect_cycles,
        }
    }

    /// Evaluates `rules` against this analysis.
    #[must_use]
    pub fn check(&self, rules: &RuleSet) -> CheckResult {
        evaluate(rules, &self.graph, &self.cycles)
    }

    /// Returns true if cycle detection ran and found at least one cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        self.cycles_detected && !self.cycles.is_empty()
    }
}
