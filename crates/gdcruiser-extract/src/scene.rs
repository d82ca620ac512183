//! Scene (`.tscn`) fact extraction.

use std::collections::HashSet;

use gdcruiser_core::{Dependency, DependencyKind};

use crate::extractor::{Extraction, SourceExtractor};
use crate::patterns::SCENE_SCRIPT_RESOURCE;

/// Extracts the scripts a scene attaches through `ext_resource` entries.
///
/// Each distinct script path yields one edge, at the line of its first
/// occurrence. Scenes never declare a type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneExtractor;

impl SceneExtractor {
    /// Creates the extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceExtractor for SceneExtractor {
    fn language_id(&self) -> &'static str {
        "scene"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tscn"]
    }

    fn extract(&self, source: &str) -> Extraction {
        let mut seen = HashSet::new();
        let dependencies = source
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let caps = SCENE_SCRIPT_RESOURCE.captures(line)?;
                let script = caps[1].to_string();
                seen.insert(script.clone()).then(|| {
                    Dependency::by_path(script, DependencyKind::SceneScript).at_line(index + 1)
                })
            })
            .collect();

        Extraction {
            class_name: None,
            dependencies,
        }
    }
}
