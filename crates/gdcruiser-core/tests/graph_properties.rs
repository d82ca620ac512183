//! Property tests for cycle detection and symbol resolution.

use gdcruiser_core::{
    find_cycles, Dependency, DependencyGraph, DependencyKind, GraphBuilder, Module,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn path(i: usize) -> String {
    format!("res://m{i:02}.gd")
}

fn build(nodes: usize, edges: &[(usize, usize)]) -> DependencyGraph {
    let mut builder = GraphBuilder::new();
    for i in 0..nodes {
        let deps = edges
            .iter()
            .filter(|(from, _)| *from == i)
            .map(|(_, to)| Dependency::by_path(path(*to), DependencyKind::Preload));
        builder.add_module(Module::new(path(i)).with_dependencies(deps));
    }
    builder.build()
}

fn reachable(edges: &[(usize, usize)], start: usize) -> HashSet<usize> {
    let mut seen = HashSet::new();
    let mut queue = vec![start];
    while let Some(node) = queue.pop() {
        for &(from, to) in edges {
            if from == node && seen.insert(to) {
                queue.push(to);
            }
        }
    }
    seen
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..40)))
}

proptest! {
    #[test]
    fn cycles_have_at_least_two_known_members((nodes, edges) in graph_strategy()) {
        let graph = build(nodes, &edges);
        for cycle in find_cycles(&graph) {
            prop_assert!(cycle.len() >= 2);
            for member in cycle.members() {
                prop_assert!(graph.has_module(member));
            }
        }
    }

    #[test]
    fn cycles_are_disjoint((nodes, edges) in graph_strategy()) {
        let graph = build(nodes, &edges);
        let mut seen = HashSet::new();
        for cycle in find_cycles(&graph) {
            for member in cycle.members() {
                prop_assert!(seen.insert(member.clone()), "{} in two cycles", member);
            }
        }
    }

    #[test]
    fn cycles_are_exactly_the_mutually_reachable_groups((nodes, edges) in graph_strategy()) {
        let graph = build(nodes, &edges);
        let reach: Vec<HashSet<usize>> = (0..nodes).map(|i| reachable(&edges, i)).collect();

        let mut expected: BTreeSet<Vec<String>> = BTreeSet::new();
        for i in 0..nodes {
            let mut group: Vec<String> = (0..nodes)
                .filter(|&j| j == i || (reach[i].contains(&j) && reach[j].contains(&i)))
                .map(path)
                .collect();
            if group.len() > 1 {
                group.sort();
                expected.insert(group);
            }
        }

        let found: BTreeSet<Vec<String>> = find_cycles(&graph)
            .iter()
            .map(|c| c.key().into_iter().map(str::to_string).collect())
            .collect();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn resolution_is_idempotent(
        declared in prop::collection::vec(prop::option::of(0usize..4), 1..8),
        references in prop::collection::vec((0usize..8, 0usize..6), 0..16),
    ) {
        let names = ["Actor", "Enemy", "Item", "Level", "Ghost", "Spirit"];
        let mut builder = GraphBuilder::new();
        for (i, class) in declared.iter().enumerate() {
            let mut module = Module::new(path(i));
            if let Some(c) = class {
                module = module.with_class_name(names[*c]);
            }
            let deps = references
                .iter()
                .filter(|(from, _)| *from == i)
                .map(|(_, name)| Dependency::by_type_name(names[*name]));
            builder.add_module(module.with_dependencies(deps));
        }

        builder.resolve_symbols();
        let once: Vec<Module> = (0..declared.len())
            .filter_map(|i| builder.get_module(&path(i)).cloned())
            .collect();
        builder.resolve_symbols();
        let twice: Vec<Module> = (0..declared.len())
            .filter_map(|i| builder.get_module(&path(i)).cloned())
            .collect();

        prop_assert_eq!(&once, &twice);
        for module in &once {
            for dep in &module.dependencies {
                prop_assert_eq!(dep.resolved, builder.symbols().has(dep.symbol.as_deref().unwrap_or("")));
            }
        }
    }
}
