//! Report rendering.
//!
//! Every renderer returns the full report as a string without a trailing
//! newline; the caller decides where it goes.

use anyhow::Result;
use gdcruiser_core::{Analysis, CheckResult};
use std::collections::HashMap;

use crate::OutputFormat;

mod dot;
mod json;
mod mermaid;
mod text;

/// Everything a renderer needs from one `check` run.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// Frozen graph and detected cycles.
    pub analysis: &'a Analysis,
    /// Rule evaluation result, when rules ran.
    pub rules: Option<&'a CheckResult>,
    /// Files that could not be read.
    pub errors: &'a [String],
}

impl<'a> Report<'a> {
    /// Index of the cycle each member belongs to.
    fn cycle_index(&self) -> HashMap<&'a str, usize> {
        let analysis: &'a Analysis = self.analysis;
        analysis
            .cycles
            .iter()
            .enumerate()
            .flat_map(|(i, cycle)| cycle.members().iter().map(move |m| (m.as_str(), i)))
            .collect()
    }

    /// True when both ends of an edge sit in the same cycle.
    fn is_cycle_edge(index: &HashMap<&str, usize>, from: &str, to: &str) -> bool {
        matches!((index.get(from), index.get(to)), (Some(a), Some(b)) if a == b)
    }
}

/// Renders `report` in `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &Report<'_>, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report)?,
        OutputFormat::Dot => dot::render(report),
        OutputFormat::Mermaid => mermaid::render(report),
    })
}

/// Strips the `res://` prefix for display labels.
fn short_path(path: &str) -> &str {
    path.strip_prefix("res://").unwrap_or(path)
}
