//! Declared type names and the modules that declare them.

use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Bidirectional mapping between `class_name` declarations and module paths.
///
/// Names are expected to be unique within a project. A later registration of
/// the same name replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    by_name: BTreeMap<String, String>,
    by_path: HashMap<String, String>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `path` declares the type `name`.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<String>) {
        let name = name.into();
        let path = path.into();

        if let Some(previous) = self.by_name.get(&name) {
            if *previous != path {
                warn!(
                    "class_name {} declared by both {} and {}; using {}",
                    name, previous, path, path
                );
            }
        }

        self.by_path.insert(path.clone(), name.clone());
        self.by_name.insert(name, path);
    }

    /// Returns the path of the module declaring `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Returns the type name declared by the module at `path`.
    #[must_use]
    pub fn class_name_of(&self, path: &str) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    /// Returns true if `name` has been registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterates `(name, path)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.by_name
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }
}
