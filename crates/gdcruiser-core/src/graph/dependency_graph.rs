//! Frozen, read-only dependency graph.

use std::collections::{BTreeMap, HashMap};

use super::module::{Dependency, Module};
use crate::symbols::SymbolTable;

/// Read-only view over all modules and their edges.
///
/// Produced by [`super::GraphBuilder::build`]. Iteration is ordered by path.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    modules: BTreeMap<String, Module>,
    symbols: SymbolTable,
    /// target path -> (source path, edge index) in source order.
    reverse: HashMap<String, Vec<(String, usize)>>,
    edge_count: usize,
}

impl DependencyGraph {
    pub(super) fn freeze(modules: BTreeMap<String, Module>, symbols: SymbolTable) -> Self {
        let mut reverse: HashMap<String, Vec<(String, usize)>> = HashMap::new();
        let mut edge_count = 0;

        for (path, module) in &modules {
            edge_count += module.dependencies.len();
            for (index, dep) in module.dependencies.iter().enumerate() {
                reverse
                    .entry(dep.target.clone())
                    .or_default()
                    .push((path.clone(), index));
            }
        }

        Self {
            modules,
            symbols,
            reverse,
            edge_count,
        }
    }

    /// Returns a module by canonical path.
    #[must_use]
    pub fn get_module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    /// Returns true if a module with this path exists.
    #[must_use]
    pub fn has_module(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    /// Iterates all modules sorted by path.
    pub fn all_modules(&self) -> impl Iterator<Item = &Module> + '_ {
        self.modules.values()
    }

    /// Outgoing edges of `path`; empty for unknown modules.
    #[must_use]
    pub fn dependencies_of(&self, path: &str) -> &[Dependency] {
        self.modules
            .get(path)
            .map_or(&[][..], |m| m.dependencies.as_slice())
    }

    /// Incoming edges of `path` as `(source path, edge)` pairs.
    ///
    /// Ordered by source path, then by edge order within the source.
    #[must_use]
    pub fn dependents_of(&self, path: &str) -> Vec<(&str, &Dependency)> {
        let Some(entries) = self.reverse.get(path) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|(source, index)| {
                let module = self.modules.get(source)?;
                let dep = module.dependencies.get(*index)?;
                Some((module.path.as_str(), dep))
            })
            .collect()
    }

    /// Number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Total number of edges across all modules.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Alias of [`Self::edge_count`].
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.edge_count
    }

    /// Type names declared in the project.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns true if the graph has no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
