//! Project ingestion: scan, read, extract, and collect modules.

use std::path::Path;

use gdcruiser_core::{AnalyzerConfig, GraphBuilder};
use tracing::{debug, info, warn};

use crate::extractor::default_extractors;
use crate::scanner::{FileKind, ScanError, Scanner};

/// A file that could not be read. Not fatal to the analysis.
#[derive(Debug, thiserror::Error)]
#[error("failed to read {res_path}: {source}")]
pub struct IngestError {
    /// `res://` path of the file.
    pub res_path: String,
    /// Underlying read error.
    pub source: std::io::Error,
}

/// Result of ingesting a project.
#[derive(Debug)]
pub struct Ingestion {
    /// Builder holding one module per readable file.
    pub builder: GraphBuilder,
    /// Files that failed to read.
    pub errors: Vec<IngestError>,
    /// Number of scripts ingested.
    pub scripts: usize,
    /// Number of scenes ingested.
    pub scenes: usize,
}

impl Ingestion {
    /// Error messages, for reporting.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Scans `root` and extracts every script and scene into a [`GraphBuilder`].
///
/// `extra_excludes` are appended to the configured exclusion globs.
/// Type-name references are left unresolved; resolution happens when the
/// builder is frozen.
///
/// # Errors
///
/// Returns an error if an exclusion glob is invalid or the walk fails.
pub fn ingest_project(
    root: &Path,
    config: &AnalyzerConfig,
    extra_excludes: &[String],
) -> Result<Ingestion, ScanError> {
    let scanner = Scanner::new(root)
        .respect_gitignore(config.respect_gitignore)
        .exclude(config.exclude.iter().chain(extra_excludes))?;

    let files = scanner.scan()?;
    let scripts = files.iter().filter(|f| f.kind == FileKind::Script).count();
    let scenes = files.len() - scripts;
    info!("Found {scripts} GDScript files and {scenes} scene files");

    let extractors = default_extractors();
    let mut ingestion = Ingestion {
        builder: GraphBuilder::new(),
        errors: Vec::new(),
        scripts: 0,
        scenes: 0,
    };

    for file in files {
        let Some(extractor) = extractors.iter().find(|e| e.handles(file.extension())) else {
            continue;
        };

        let source = match std::fs::read_to_string(&file.path) {
            Ok(source) => source,
            Err(source) => {
                warn!("Skipping {}: {source}", file.res_path);
                ingestion.errors.push(IngestError {
                    res_path: file.res_path,
                    source,
                });
                continue;
            }
        };

        let extraction = extractor.extract(&source);
        debug!(
            "{} [{}]: {} dependencies",
            file.res_path,
            extractor.language_id(),
            extraction.dependencies.len()
        );

        match file.kind {
            FileKind::Script => ingestion.scripts += 1,
            FileKind::Scene => ingestion.scenes += 1,
        }
        ingestion
            .builder
            .add_module(extraction.into_module(file.res_path));
    }

    Ok(ingestion)
}

/// Extracts a single source text with the extractor registered for `extension`.
#[must_use]
pub fn extract_source(
    extension: &str,
    res_path: &str,
    source: &str,
) -> Option<gdcruiser_core::Module> {
    default_extractors()
        .iter()
        .find(|e| e.handles(extension))
        .map(|e| e.extract(source).into_module(res_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdcruiser_core::DependencyKind;

    #[test]
    fn extract_source_picks_extractor_by_extension() {
        let module = extract_source("gd", "res://a.gd", "class_name A\nextends Node\n").unwrap();
        assert_eq!(module.path, "res://a.gd");
        assert_eq!(module.class_name.as_deref(), Some("A"));

        let scene = extract_source(
            "tscn",
            "res://a.tscn",
            "[ext_resource type=\"Script\" path=\"res://a.gd\" id=\"1\"]\n",
        )
        .unwrap();
        assert_eq!(scene.dependencies[0].kind, DependencyKind::SceneScript);

        assert!(extract_source("png", "res://icon.png", "").is_none());
    }

    #[test]
    fn ingest_error_display_names_file() {
        let err = IngestError {
            res_path: "res://broken.gd".into(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read res://broken.gd: stream did not contain valid UTF-8"
        );
        let cause = std::error::Error::source(&err).expect("read error is the source");
        assert_eq!(cause.to_string(), "stream did not contain valid UTF-8");
    }
}
