//! Cycle detection over the frozen dependency graph.
//!
//! Cycles are the strongly connected components with more than one member,
//! found with Tarjan's algorithm. The DFS runs on an explicit stack so deep
//! dependency chains cannot exhaust the thread stack.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::graph::DependencyGraph;

/// A group of modules that all reach each other.
///
/// Members are kept in DFS discovery order. Only set membership is
/// meaningful; use [`Cycle::key`] to compare cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(Vec<String>);

impl Cycle {
    /// Creates a cycle from its member paths.
    #[must_use]
    pub fn new(members: Vec<String>) -> Self {
        Self(members)
    }

    /// Member paths in discovery order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.0
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for a cycle without members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `path` is a member.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|m| m == path)
    }

    /// Sorted member list; equal for cycles over the same module set.
    #[must_use]
    pub fn key(&self) -> Vec<&str> {
        let mut key: Vec<&str> = self.0.iter().map(String::as_str).collect();
        key.sort_unstable();
        key
    }

    /// Members rotated to start at the lexicographically smallest path.
    #[must_use]
    pub fn rotated(&self) -> Vec<&str> {
        let start = self
            .0
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map_or(0, |(i, _)| i);
        self.0[start..]
            .iter()
            .chain(&self.0[..start])
            .map(String::as_str)
            .collect()
    }

    /// `a -> b -> c`
    #[must_use]
    pub fn path(&self) -> String {
        self.rotated().join(" -> ")
    }

    /// `a -> b -> c -> a`
    #[must_use]
    pub fn chain(&self) -> String {
        let rotated = self.rotated();
        match rotated.first() {
            Some(first) => format!("{} -> {first}", rotated.join(" -> ")),
            None => String::new(),
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chain())
    }
}

/// Finds every strongly connected component with two or more modules.
///
/// Edges whose target is not a module in the graph are skipped. A module
/// that only depends on itself is not reported.
#[must_use]
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let nodes: Vec<&str> = graph.all_modules().map(|m| m.path.as_str()).collect();
    let position: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, p)| (*p, i)).collect();
    let adjacency: Vec<Vec<usize>> = nodes
        .iter()
        .map(|path| {
            graph
                .dependencies_of(path)
                .iter()
                .filter_map(|dep| position.get(dep.target.as_str()).copied())
                .collect()
        })
        .collect();

    let mut tarjan = Tarjan::new(adjacency.len());
    for root in 0..adjacency.len() {
        if tarjan.index[root].is_none() {
            tarjan.run(root, &adjacency);
        }
    }

    let cycles: Vec<Cycle> = tarjan
        .components
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| Cycle(component.into_iter().map(|i| nodes[i].to_string()).collect()))
        .collect();

    debug!(count = cycles.len(), "cycle detection finished");
    cycles
}

struct Tarjan {
    counter: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl Tarjan {
    fn new(size: usize) -> Self {
        Self {
            counter: 0,
            index: vec![None; size],
            lowlink: vec![0; size],
            on_stack: vec![false; size],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: usize) {
        self.index[node] = Some(self.counter);
        self.lowlink[node] = self.counter;
        self.counter += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
    }

    fn run(&mut self, root: usize, adjacency: &[Vec<usize>]) {
        // (node, next neighbor position)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.discover(root);

        while let Some(frame) = frames.last_mut() {
            let (node, pos) = *frame;

            if let Some(&next) = adjacency[node].get(pos) {
                frame.1 += 1;
                match self.index[next] {
                    None => {
                        self.discover(next);
                        frames.push((next, 0));
                    }
                    Some(next_index) if self.on_stack[next] => {
                        self.lowlink[node] = self.lowlink[node].min(next_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[node]);
            }

            if Some(self.lowlink[node]) == self.index[node] {
                self.pop_component(node);
            }
        }
    }

    fn pop_component(&mut self, root: usize) {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack[member] = false;
            component.push(member);
            if member == root {
                break;
            }
        }
        component.reverse();
        self.components.push(component);
    }
}
