//! Extraction types and trait.
//!
//! `SourceExtractor` is the extension point for new file kinds. An extractor
//! receives raw text and returns the declared type name and the dependency
//! edges found in it, with type-name edges still unresolved.

use gdcruiser_core::{Dependency, Module};

/// Facts extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Declared `class_name`, if any.
    pub class_name: Option<String>,
    /// Dependencies in source order.
    pub dependencies: Vec<Dependency>,
}

impl Extraction {
    /// Turns the extraction into a module keyed by `res_path`.
    #[must_use]
    pub fn into_module(self, res_path: impl Into<String>) -> Module {
        let module = Module::new(res_path).with_dependencies(self.dependencies);
        match self.class_name {
            Some(name) => module.with_class_name(name),
            None => module,
        }
    }
}

/// Trait for file-kind specific fact extraction.
pub trait SourceExtractor: Send + Sync {
    /// Identifier used in logs (e.g., `"gdscript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts the declared type name and dependencies from source text.
    fn extract(&self, source: &str) -> Extraction;

    /// Returns true if this extractor handles files with `extension`.
    fn handles(&self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }
}

/// Extractors for every supported file kind.
#[must_use]
pub fn default_extractors() -> Vec<Box<dyn SourceExtractor>> {
    vec![
        Box::new(crate::gdscript::GdscriptExtractor::new()),
        Box::new(crate::scene::SceneExtractor::new()),
    ]
}
