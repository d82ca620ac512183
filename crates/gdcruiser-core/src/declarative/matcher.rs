//! Compiled path predicates.

use regex::Regex;
use std::fmt;

use super::model::ModelError;

/// A regular expression compiled once at load time.
///
/// Matching uses search semantics: the pattern may match anywhere in the
/// path unless it is anchored.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    compiled: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidPattern`] if the regex does not compile.
    pub fn new(pattern: &str) -> Result<Self, ModelError> {
        let compiled = Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Returns true if the pattern matches anywhere in `path`.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.compiled.is_match(path)
    }

    /// The source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Include/exclude predicate over module paths.
///
/// With neither pattern set the matcher accepts every path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatcher {
    include: Option<Pattern>,
    exclude: Option<Pattern>,
}

impl PathMatcher {
    /// Creates a matcher from already compiled patterns.
    #[must_use]
    pub fn new(include: Option<Pattern>, exclude: Option<Pattern>) -> Self {
        Self { include, exclude }
    }

    /// A matcher that accepts everything.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Compiles a matcher from raw pattern strings. Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidPattern`] for the first pattern that
    /// does not compile.
    pub fn compile(include: Option<&str>, exclude: Option<&str>) -> Result<Self, ModelError> {
        let compile = |raw: Option<&str>| {
            raw.filter(|p| !p.is_empty()).map(Pattern::new).transpose()
        };
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Tests `path` against both patterns.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        true
    }

    /// Returns true if neither pattern is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }

    /// The include pattern, if any.
    #[must_use]
    pub fn include_pattern(&self) -> Option<&str> {
        self.include.as_ref().map(Pattern::as_str)
    }

    /// Short description used in messages, e.g. `^res://core/` or
    /// `^res://core/ but not _test\.gd$`.
    #[must_use]
    pub fn describe(&self) -> String {
        match (&self.include, &self.exclude) {
            (Some(inc), Some(exc)) => format!("{inc} but not {exc}"),
            (Some(inc), None) => inc.to_string(),
            (None, Some(exc)) => format!("not {exc}"),
            (None, None) => "*".to_string(),
        }
    }
}

/// Global exclusion list applied to sources and targets in every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions(Vec<Pattern>);

impl Exclusions {
    /// Creates an exclusion list.
    #[must_use]
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self(patterns)
    }

    /// Returns true if any pattern matches `path`.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.0.iter().any(|p| p.is_match(path))
    }

    /// The compiled patterns.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.0
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
