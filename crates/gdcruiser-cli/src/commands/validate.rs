//! Validate command implementation.

use anyhow::{bail, Result};
use gdcruiser_core::declarative::validator::ValidationReport;
use gdcruiser_core::Config;

use crate::config_resolver::{self, ConfigFile};

/// Runs the validate command.
pub fn run(config_file: Option<&ConfigFile>) -> Result<()> {
    let Some(file) = config_file else {
        println!("No config file found");
        return Ok(());
    };
    let path = &file.path;

    let config = config_resolver::load(Some(file))?;
    let report = config.validate();
    print_issues(&report);

    if !report.is_valid() {
        bail!(
            "{} has {} error(s)",
            path.display(),
            report.errors.len()
        );
    }

    println!("Config valid: {}", path.display());
    for line in summary(&config) {
        println!("  {line}");
    }
    Ok(())
}

/// Prints warnings and errors with their field paths to stderr.
pub fn print_issues(report: &ValidationReport) {
    for w in &report.warnings {
        eprintln!("Warning: {w}");
    }
    for e in &report.errors {
        eprintln!("Error: {e}");
    }
}

fn summary(config: &Config) -> Vec<String> {
    let rules = &config.rules;
    vec![
        format!("Forbidden rules: {}", rules.forbidden.len()),
        format!("Allowed rules: {}", rules.allowed.len()),
        format!("Required rules: {}", rules.required.len()),
        format!("Global exclusions: {}", rules.options.exclude.len()),
    ]
}
