//! Human-readable text report.

use gdcruiser_core::{CheckResult, Severity};

use super::Report;

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "----------------------------------------";

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
        Severity::Info => "INFO",
        Severity::Ignore => "IGNORE",
    }
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(LIGHT_RULE.to_string());
    lines.push(title.to_string());
    lines.push(LIGHT_RULE.to_string());
}

pub(super) fn render(report: &Report<'_>) -> String {
    let graph = &report.analysis.graph;
    let cycles = &report.analysis.cycles;
    let mut lines = vec![
        HEAVY_RULE.to_string(),
        "GDScript Dependency Analysis".to_string(),
        HEAVY_RULE.to_string(),
        String::new(),
        format!("Modules: {}", graph.module_count()),
        format!("Dependencies: {}", graph.dependency_count()),
        String::new(),
    ];

    if !cycles.is_empty() {
        section(
            &mut lines,
            &format!("CIRCULAR DEPENDENCIES ({} found)", cycles.len()),
        );
        for (i, cycle) in cycles.iter().enumerate() {
            let members = cycle.rotated();
            lines.push(String::new());
            lines.push(format!("Cycle {}:", i + 1));
            for member in &members {
                lines.push(format!("  -> {member}"));
            }
            if let Some(first) = members.first() {
                lines.push(format!("  -> {first} (back to start)"));
            }
        }
        lines.push(String::new());
    }

    section(&mut lines, "MODULE DEPENDENCIES");
    for module in graph.all_modules() {
        lines.push(String::new());
        lines.push(module.path.clone());
        if let Some(class_name) = &module.class_name {
            lines.push(format!("  class_name: {class_name}"));
        }
        if module.dependencies.is_empty() {
            lines.push("  (no dependencies)".to_string());
        }
        for dep in &module.dependencies {
            let line = dep.line.map(|l| format!(":{l}")).unwrap_or_default();
            let unresolved = if dep.resolved { "" } else { " [unresolved]" };
            lines.push(format!("  {}: {}{line}{unresolved}", dep.kind, dep.target));
        }
    }

    if !report.errors.is_empty() {
        lines.push(String::new());
        section(&mut lines, "ERRORS");
        for error in report.errors {
            lines.push(format!("  {error}"));
        }
    }

    if let Some(result) = report.rules {
        render_violations(&mut lines, result);
    }

    lines.join("\n")
}

fn render_violations(lines: &mut Vec<String>, result: &CheckResult) {
    if result.violations.is_empty() {
        return;
    }

    lines.push(String::new());
    section(
        lines,
        &format!(
            "RULE VIOLATIONS ({} errors, {} warnings)",
            result.error_count(),
            result.warning_count()
        ),
    );

    for (rule, violations) in result.grouped_by_rule() {
        let Some(first) = violations.first() else {
            continue;
        };
        lines.push(String::new());
        lines.push(format!("[{}] {rule}", severity_tag(first.severity)));
        if let Some(comment) = &first.comment {
            lines.push(format!("  {comment}"));
        }
        for v in violations {
            match &v.to {
                Some(to) => lines.push(format!("    {} -> {to}", v.from)),
                None => lines.push(format!("    {}", v.from)),
            }
        }
    }
}
