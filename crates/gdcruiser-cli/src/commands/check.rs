//! Check command implementation.

use anyhow::{bail, Context, Result};
use gdcruiser_core::{Analysis, CheckResult, Config};
use gdcruiser_extract::{ingest_project, is_godot_project};
use std::path::{Path, PathBuf};

use super::output::{self, Report};
use super::validate::print_issues;
use crate::config_resolver::{self, ConfigFile};
use crate::OutputFormat;

/// Options for one `check` run.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Report format.
    pub format: OutputFormat,
    /// Report destination; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Run cycle detection.
    pub detect_cycles: bool,
    /// Evaluate configured rules.
    pub evaluate_rules: bool,
    /// Extra exclusion globs from the command line.
    pub exclude: Vec<String>,
}

/// Outcome of a check run.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Rendered report.
    pub rendered: String,
    /// Whether the run should exit non-zero.
    pub failed: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, config_file: Option<&ConfigFile>) -> Result<()> {
    let config = config_resolver::load(config_file)?;
    let outcome = execute(path, options, &config)?;

    match &options.output {
        Some(file) => {
            std::fs::write(file, &outcome.rendered)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            tracing::info!("Output written to: {}", file.display());
        }
        None => println!("{}", outcome.rendered),
    }

    // Exit with error code on error-severity violations or detected cycles
    if outcome.failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Analyzes `path` with `config` and renders the report.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the project cannot be
/// scanned, or rendering fails.
pub fn execute(path: &Path, options: &CheckOptions, config: &Config) -> Result<CheckOutcome> {
    let rules = if config.has_rules() && options.evaluate_rules {
        let report = config.validate();
        if !report.is_valid() {
            print_issues(&report);
            bail!("Configuration has {} error(s)", report.errors.len());
        }
        for w in &report.warnings {
            tracing::warn!("{w}");
        }
        let set = config.rule_set().context("Failed to load rules")?;
        tracing::debug!("Rules loaded: {}", set.len());
        Some(set)
    } else {
        None
    };

    if !is_godot_project(path) {
        tracing::warn!("No project.godot in {}; analyzing anyway", path.display());
    }

    let ingestion = ingest_project(path, &config.analyzer, &options.exclude)
        .with_context(|| format!("Failed to scan {}", path.display()))?;
    let errors = ingestion.error_messages();

    let analysis = Analysis::run(ingestion.builder, options.detect_cycles);
    let result: Option<CheckResult> = rules.as_ref().map(|set| analysis.check(set));

    let report = Report {
        analysis: &analysis,
        rules: result.as_ref(),
        errors: &errors,
    };
    let rendered = output::render(&report, options.format)?;

    let failed = result.as_ref().is_some_and(CheckResult::has_errors) || analysis.has_cycles();

    Ok(CheckOutcome { rendered, failed })
}
