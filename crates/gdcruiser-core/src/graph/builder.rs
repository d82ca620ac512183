//! Mutable ingestion stage of the graph lifecycle.

use std::collections::BTreeMap;
use tracing::debug;

use super::dependency_graph::DependencyGraph;
use super::module::Module;
use crate::symbols::SymbolTable;

/// Collects modules during a project scan.
///
/// Type-name references stay unresolved until [`GraphBuilder::resolve_symbols`]
/// runs, so forward references to types declared later in scan order are fine.
/// [`GraphBuilder::build`] resolves and freezes the result.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    modules: BTreeMap<String, Module>,
    symbols: SymbolTable,
}

impl GraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a module, replacing any earlier module with the same path.
    ///
    /// A declared `class_name` is registered in the symbol table.
    pub fn add_module(&mut self, module: Module) {
        if let Some(name) = &module.class_name {
            self.symbols.register(name.clone(), module.path.clone());
        }
        if self.modules.contains_key(&module.path) {
            debug!("replacing module {}", module.path);
        }
        self.modules.insert(module.path.clone(), module);
    }

    /// Rewrites type-name edges to the path of the declaring module.
    ///
    /// Unknown names leave the edge pointing at the name with
    /// `resolved = false`. Running this more than once has no further effect.
    pub fn resolve_symbols(&mut self) {
        let mut resolved = 0usize;
        let mut unresolved = 0usize;

        for module in self.modules.values_mut() {
            for dep in &mut module.dependencies {
                if !dep.kind.requires_resolution() {
                    continue;
                }
                let name = dep.symbol.get_or_insert_with(|| dep.target.clone());
                if let Some(path) = self.symbols.resolve(name) {
                    dep.target = path.to_string();
                    dep.resolved = true;
                    resolved += 1;
                } else {
                    dep.target.clone_from(name);
                    dep.resolved = false;
                    unresolved += 1;
                }
            }
        }

        debug!(resolved, unresolved, "resolved type-name references");
    }

    /// Returns the symbol table collected so far.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns a module by path.
    #[must_use]
    pub fn get_module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    /// Number of modules added.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Resolves type-name references and freezes the graph.
    #[must_use]
    pub fn build(mut self) -> DependencyGraph {
        self.resolve_symbols();
        DependencyGraph::freeze(self.modules, self.symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Dependency, DependencyKind};

    #[test]
    fn resolves_forward_references() {
        let mut builder = GraphBuilder::new();
        builder.add_module(
            Module::new("res://player.gd").with_dependency(Dependency::by_type_name("Actor")),
        );
        builder.add_module(Module::new("res://actor.gd").with_class_name("Actor"));

        let graph = builder.build();
        let deps = graph.dependencies_of("res://player.gd");
        assert_eq!(deps[0].target, "res://actor.gd");
        assert!(deps[0].resolved);
    }

    #[test]
    fn unknown_names_stay_unresolved() {
        let mut builder = GraphBuilder::new();
        builder.add_module(
            Module::new("res://player.gd").with_dependency(Dependency::by_type_name("Ghost")),
        );

        let graph = builder.build();
        let deps = graph.dependencies_of("res://player.gd");
        assert_eq!(deps[0].target, "Ghost");
        assert!(!deps[0].resolved);
    }

    #[test]
    fn path_edges_are_untouched() {
        let mut builder = GraphBuilder::new();
        builder.add_module(
            Module::new("res://a.gd")
                .with_dependency(Dependency::by_path("res://missing.gd", DependencyKind::Load)),
        );
        builder.resolve_symbols();

        let module = builder.get_module("res://a.gd").unwrap();
        assert_eq!(module.dependencies[0].target, "res://missing.gd");
        assert!(module.dependencies[0].resolved);
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut builder = GraphBuilder::new();
        builder.add_module(
            Module::new("res://a.gd")
                .with_dependency(Dependency::by_type_name("Base"))
                .with_dependency(Dependency::by_type_name("Missing")),
        );
        builder.add_module(Module::new("res://base.gd").with_class_name("Base"));

        builder.resolve_symbols();
        let first = builder.get_module("res://a.gd").unwrap().clone();
        builder.resolve_symbols();
        let second = builder.get_module("res://a.gd").unwrap();

        assert_eq!(&first, second);
    }

    #[test]
    fn replacing_a_module_drops_its_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_module(
            Module::new("res://a.gd")
                .with_dependency(Dependency::by_path("res://b.gd", DependencyKind::Preload)),
        );
        builder.add_module(Module::new("res://a.gd"));

        assert_eq!(builder.module_count(), 1);
        assert!(builder.get_module("res://a.gd").unwrap().dependencies.is_empty());
    }
}
