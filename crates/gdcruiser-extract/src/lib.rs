//! # gdcruiser-extract
//!
//! Turns a Godot project on disk into graph input for `gdcruiser-core`.
//!
//! - [`Scanner`] discovers `.gd` and `.tscn` files (gitignore-aware, glob exclusions)
//! - [`GdscriptExtractor`] and [`SceneExtractor`] pull declared types and
//!   references out of source text
//! - [`ingest_project`] ties both together into a [`gdcruiser_core::GraphBuilder`]
//!
//! Extraction is line-based pattern matching; no syntax tree is built.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extractor;
mod gdscript;
mod ingest;
mod patterns;
mod scanner;
mod scene;

pub use extractor::{default_extractors, Extraction, SourceExtractor};
pub use gdscript::{is_builtin_class, GdscriptExtractor};
pub use ingest::{extract_source, ingest_project, IngestError, Ingestion};
pub use scanner::{is_godot_project, res_path, FileKind, ScanError, Scanner, SourceFile};
pub use scene::SceneExtractor;
