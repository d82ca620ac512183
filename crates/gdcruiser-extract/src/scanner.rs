//! Project file discovery.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::debug;

/// Directories never descended into: the editor cache and VCS metadata.
const SKIPPED_DIRS: &[&str] = &[".godot", ".git"];

/// Errors raised while scanning a project.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The project root does not exist or is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// An exclusion glob could not be compiled.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },

    /// The directory walk failed.
    #[error("failed to walk project: {0}")]
    Walk(#[from] ignore::Error),
}

/// Kind of source file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    /// GDScript (`.gd`).
    Script,
    /// Text scene (`.tscn`).
    Scene,
}

impl FileKind {
    /// Maps a file extension (without the dot) to a kind.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gd" => Some(Self::Script),
            "tscn" => Some(Self::Scene),
            _ => None,
        }
    }
}

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path on disk.
    pub path: PathBuf,
    /// Canonical `res://` path.
    pub res_path: String,
    /// File kind.
    pub kind: FileKind,
}

impl SourceFile {
    /// Extension of the file on disk, without the dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
    }
}

/// Converts `path` under `root` into its `res://` form.
///
/// Returns `None` when `path` is not inside `root`.
#[must_use]
pub fn res_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(format!("res://{}", parts.join("/")))
}

/// Returns true if `root` holds a `project.godot` file.
#[must_use]
pub fn is_godot_project(root: &Path) -> bool {
    root.join("project.godot").is_file()
}

/// A compiled exclusion glob, matched against project-relative paths.
#[derive(Debug, Clone)]
struct ExcludeGlob {
    raw: String,
    compiled: glob::Pattern,
}

impl ExcludeGlob {
    fn new(pattern: &str) -> Result<Self, ScanError> {
        let compiled = glob::Pattern::new(pattern).map_err(|source| ScanError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    fn matches(&self, rel: &str) -> bool {
        if self.compiled.matches(rel) {
            return true;
        }
        // `dir/**` also covers everything below `dir` on a segment boundary.
        self.raw.strip_suffix("/**").is_some_and(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            rel.starts_with(prefix) && rel.as_bytes().get(prefix.len()) == Some(&b'/')
        })
    }
}

/// Walks a Godot project and lists its scripts and scenes.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    exclude: Vec<ExcludeGlob>,
    respect_gitignore: bool,
}

impl Scanner {
    /// Creates a scanner rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }

    /// Adds exclusion globs (project-relative, `/`-separated).
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidGlob`] for a pattern that does not compile.
    pub fn exclude<I, S>(mut self, patterns: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !pattern.is_empty() {
                self.exclude.push(ExcludeGlob::new(pattern)?);
            }
        }
        Ok(self)
    }

    /// Sets whether `.gitignore` files are honoured.
    #[must_use]
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    /// Project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discovers every `.gd` and `.tscn` file, sorted by `res://` path.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory or the walk fails.
    pub fn scan(&self) -> Result<Vec<SourceFile>, ScanError> {
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_name().to_str().is_some_and(|name| {
                        SKIPPED_DIRS.contains(&name)
                            && entry.file_type().is_some_and(|t| t.is_dir())
                    })
            });

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Some(kind) = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(FileKind::from_extension)
            else {
                continue;
            };

            let Some(res) = res_path(&self.root, path) else {
                continue;
            };
            let rel = &res["res://".len()..];
            if self.exclude.iter().any(|glob| glob.matches(rel)) {
                debug!("Excluding: {rel}");
                continue;
            }

            files.push(SourceFile {
                path: path.to_path_buf(),
                res_path: res,
                kind,
            });
        }

        files.sort_by(|a, b| a.res_path.cmp(&b.res_path));
        Ok(files)
    }
}
