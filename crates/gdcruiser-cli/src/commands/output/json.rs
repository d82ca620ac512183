//! JSON report.

use anyhow::Result;
use gdcruiser_core::{CheckResult, Module, Violation};
use serde::Serialize;
use std::collections::BTreeMap;

use super::Report;

#[derive(Serialize)]
struct JsonReport<'a> {
    graph: JsonGraph<'a>,
    cycles: Vec<Vec<&'a str>>,
    symbols: BTreeMap<&'a str, &'a str>,
    errors: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    rules: Option<JsonRules<'a>>,
}

#[derive(Serialize)]
struct JsonGraph<'a> {
    modules: BTreeMap<&'a str, &'a Module>,
    stats: JsonStats,
}

#[derive(Serialize)]
struct JsonStats {
    module_count: usize,
    dependency_count: usize,
}

#[derive(Serialize)]
struct JsonRules<'a> {
    violations: &'a [Violation],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    info: usize,
    rules_checked: usize,
}

impl<'a> JsonRules<'a> {
    fn new(result: &'a CheckResult) -> Self {
        let (errors, warnings, info) = result.count_by_severity();
        Self {
            violations: &result.violations,
            summary: JsonSummary {
                errors,
                warnings,
                info,
                rules_checked: result.rules_checked,
            },
        }
    }
}

pub(super) fn render(report: &Report<'_>) -> Result<String> {
    let graph = &report.analysis.graph;
    let doc = JsonReport {
        graph: JsonGraph {
            modules: graph.all_modules().map(|m| (m.path.as_str(), m)).collect(),
            stats: JsonStats {
                module_count: graph.module_count(),
                dependency_count: graph.dependency_count(),
            },
        },
        cycles: report.analysis.cycles.iter().map(|c| c.rotated()).collect(),
        symbols: graph.symbols().iter().collect(),
        errors: report.errors,
        rules: report.rules.map(JsonRules::new),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
