//! Line patterns for GDScript and scene files.
//!
//! All patterns are literals; they are compiled on first use.

#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use regex::Regex;

/// `extends "res://path/to/base.gd"`
pub(crate) static EXTENDS_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*extends\s+"(res://[^"]+)""#).expect("EXTENDS_PATH pattern"));

/// `extends BaseClass`, optionally followed by a comment.
pub(crate) static EXTENDS_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*extends\s+([A-Z][A-Za-z0-9_]*)\s*(?:#.*)?$").expect("EXTENDS_CLASS pattern")
});

/// `class_name Player`
pub(crate) static CLASS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*class_name\s+([A-Z][A-Za-z0-9_]*)").expect("CLASS_NAME pattern")
});

/// `preload("res://...")`
pub(crate) static PRELOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"preload\s*\(\s*"(res://[^"]+)"\s*\)"#).expect("PRELOAD pattern")
});

/// `load("res://...")`, including `preload(` hits that [`load_targets`] drops.
pub(crate) static LOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"load\s*\(\s*"(res://[^"]+)"\s*\)"#).expect("LOAD pattern")
});

/// Targets of `load(...)` calls on `line` that are not `preload(...)`.
///
/// Identifiers ending in `load`, such as `_load(` or `reload(`, count.
pub(crate) fn load_targets(line: &str) -> impl Iterator<Item = &str> {
    LOAD.captures_iter(line).filter_map(|caps| {
        let whole = caps.get(0)?;
        if line[..whole.start()].ends_with("pre") {
            return None;
        }
        caps.get(1).map(|target| target.as_str())
    })
}

/// `[ext_resource type="Script" path="res://player.gd" id="1"]`
pub(crate) static SCENE_SCRIPT_RESOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"path="(res://[^"]+\.gd)""#).expect("SCENE_SCRIPT_RESOURCE pattern")
});
