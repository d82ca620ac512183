//! Dependency graph model.
//!
//! The graph has a two-stage lifecycle:
//!
//! ```text
//! extraction results
//!   ↓ GraphBuilder::add_module (mutable, symbol table grows)
//! GraphBuilder
//!   ↓ build() = resolve_symbols() + freeze
//! DependencyGraph (read-only)
//! ```

mod builder;
mod dependency_graph;
mod module;

pub use builder::GraphBuilder;
pub use dependency_graph::DependencyGraph;
pub use module::{Dependency, DependencyKind, Module};
