//! Configuration file model for gdcruiser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::declarative::config_dto::RuleConfigDto;
use crate::declarative::loader::{self, LoadError};
use crate::declarative::model::RuleSet;
use crate::declarative::validator::{self, ValidationReport};

/// Top-level configuration.
///
/// The rule sections (`forbidden`, `allowed`, `required`, `options`) sit at
/// the top level next to `[analyzer]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Project scanning settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Rule declarations.
    #[serde(flatten)]
    pub rules: RuleConfigDto,
}

impl Config {
    /// Creates an empty configuration with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.json` files are parsed as JSON, `.toml` files as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::read(path, ConfigFormat::from_path(path)?)
    }

    /// Reads `path` as `format`, ignoring its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: &Path, format: ConfigFormat) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let parsed = match format {
            ConfigFormat::Toml => Self::parse_toml(&content),
            ConfigFormat::Json => Self::parse_json(&content),
        };
        parsed.map_err(|e| e.with_path(path))
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Returns true if at least one rule is declared.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        self.rules.has_rules()
    }

    /// Compiles the rule sections into a [`RuleSet`].
    ///
    /// # Errors
    ///
    /// Returns the first invalid regex, empty name or unknown severity.
    pub fn rule_set(&self) -> Result<RuleSet, LoadError> {
        loader::load(&self.rules)
    }

    /// Checks every rule and option, collecting all problems.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validator::validate(&self.rules)
    }
}

/// Serialization of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// `[analyzer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns, relative to the project root, of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(code(gdcruiser::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config{}: {message}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(gdcruiser::config::parse),
        help("see `gdcruiser init` for a commented example configuration")
    )]
    Parse {
        /// File the content came from, if any.
        path: Option<PathBuf>,
        /// Parse error message.
        message: String,
    },

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported config file format: {path}")]
    #[diagnostic(
        code(gdcruiser::config::format),
        help("use a .toml or .json file")
    )]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },
}

impl ConfigError {
    fn with_path(self, file: &Path) -> Self {
        match self {
            Self::Parse { path: None, message } => Self::Parse {
                path: Some(file.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}
