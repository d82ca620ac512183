//! Modules and the dependency edges they own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic category of a dependency reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// `extends "res://path/to/base.gd"`
    ExtendsPath,
    /// `extends BaseClass`, resolved through the symbol table.
    ExtendsClass,
    /// `preload("res://...")`
    Preload,
    /// `load("res://...")`
    Load,
    /// Script attached to a node in a `.tscn` scene.
    SceneScript,
}

impl DependencyKind {
    /// Returns true for references by type name, which start unresolved.
    #[must_use]
    pub fn requires_resolution(self) -> bool {
        matches!(self, Self::ExtendsClass)
    }

    /// Stable identifier used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExtendsPath => "extends_path",
            Self::ExtendsClass => "extends_class",
            Self::Preload => "preload",
            Self::Load => "load",
            Self::SceneScript => "scene_script",
        }
    }

    /// Short label for graph renderings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtendsPath | Self::ExtendsClass => "extends",
            Self::Preload => "preload",
            Self::Load => "load",
            Self::SceneScript => "script",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed reference from the owning module to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Canonical path of the referenced module, or the type name while unresolved.
    pub target: String,
    /// Reference kind.
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    /// Source line (1-indexed), when known.
    pub line: Option<usize>,
    /// Whether `target` names a concrete module path.
    pub resolved: bool,
    /// Referenced type name for by-name edges; survives resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Dependency {
    /// Creates a path-based edge. Path references are resolved at extraction time.
    #[must_use]
    pub fn by_path(target: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            target: target.into(),
            kind,
            line: None,
            resolved: true,
            symbol: None,
        }
    }

    /// Creates an unresolved reference to a declared type name.
    #[must_use]
    pub fn by_type_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            target: name.clone(),
            kind: DependencyKind::ExtendsClass,
            line: None,
            resolved: false,
            symbol: Some(name),
        }
    }

    /// Sets the source line.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A script or scene file discovered in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Canonical `res://` path; unique key within a graph.
    pub path: String,
    /// Declared `class_name`, if any.
    pub class_name: Option<String>,
    /// Outgoing edges in source order.
    pub dependencies: Vec<Dependency>,
}

impl Module {
    /// Creates a module with no declared type and no dependencies.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            class_name: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the declared type name.
    #[must_use]
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Appends an outgoing edge.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Appends several outgoing edges.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }
}
