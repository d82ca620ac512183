//! # gdcruiser-core
//!
//! Dependency graph engine and rule evaluation for Godot projects.
//!
//! This crate owns everything that happens after facts have been extracted
//! from source files:
//!
//! - [`SymbolTable`] mapping declared `class_name`s to module paths
//! - [`GraphBuilder`] / [`DependencyGraph`] for the two-phase graph lifecycle
//! - [`find_cycles`] for strongly connected component detection
//! - [`declarative`] rules (forbidden / allowed / required) and their loader
//! - [`RuleEngine`] producing a [`CheckResult`] of [`Violation`]s
//!
//! ## Example
//!
//! ```
//! use gdcruiser_core::{Analysis, Dependency, DependencyKind, GraphBuilder, Module};
//! use gdcruiser_core::declarative::load_rules_from_toml;
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_module(
//!     Module::new("res://ui/hud.gd")
//!         .with_dependency(Dependency::by_path("res://core/game.gd", DependencyKind::Preload)),
//! );
//! builder.add_module(Module::new("res://core/game.gd"));
//!
//! let rules = load_rules_from_toml(r#"
//! [[forbidden]]
//! name = "no-ui-to-core"
//! from = { path = "^res://ui/" }
//! to = { path = "^res://core/" }
//! "#).unwrap();
//!
//! let analysis = Analysis::run(builder, true);
//! let result = analysis.check(&rules);
//! assert_eq!(result.error_count(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod config;
mod context;
mod cycles;
mod engine;
mod graph;
mod rule;
mod symbols;
mod types;

/// Declarative rule configuration, validation and compilation.
pub mod declarative;

pub use analysis::Analysis;
pub use config::{AnalyzerConfig, Config, ConfigError, ConfigFormat};
pub use context::GraphContext;
pub use cycles::{find_cycles, Cycle};
pub use engine::{evaluate, RuleEngine};
pub use graph::{Dependency, DependencyGraph, DependencyKind, GraphBuilder, Module};
pub use rule::{GraphRule, GraphRuleBox};
pub use symbols::SymbolTable;
pub use types::{CheckResult, RuleCategory, Severity, Violation};
