//! Mermaid flowchart rendering.

use super::{short_path, Report};

fn node_id(path: &str) -> String {
    path.replace("://", "_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

pub(super) fn render(report: &Report<'_>) -> String {
    let graph = &report.analysis.graph;
    let cycles = report.cycle_index();
    let mut lines = vec!["graph LR".to_string()];

    let mut cycle_nodes = Vec::new();
    for module in graph.all_modules() {
        let id = node_id(&module.path);
        let short = short_path(&module.path).replace('"', "#quot;");
        let label = match &module.class_name {
            Some(name) => format!("{name}<br/>{short}"),
            None => short,
        };
        lines.push(format!("    {id}[\"{label}\"]"));
        if cycles.contains_key(module.path.as_str()) {
            cycle_nodes.push(id);
        }
    }

    lines.push(String::new());

    let mut unresolved = Vec::new();
    let edges = graph
        .all_modules()
        .flat_map(|m| m.dependencies.iter().map(move |d| (m, d)));
    for (index, (module, dep)) in edges.enumerate() {
        let from = node_id(&module.path);
        let to = node_id(&dep.target);
        let label = dep.kind.label();
        if Report::is_cycle_edge(&cycles, &module.path, &dep.target) {
            lines.push(format!("    {from} == {label} ==> {to}"));
        } else {
            lines.push(format!("    {from} -- {label} --> {to}"));
        }
        if !dep.resolved {
            unresolved.push(index);
        }
    }

    if !cycle_nodes.is_empty() {
        lines.push(String::new());
        lines.push("    classDef cycle fill:#ffcccc,stroke:#cc0000".to_string());
        lines.push(format!("    class {} cycle", cycle_nodes.join(",")));
    }

    for index in unresolved {
        lines.push(format!("    linkStyle {index} stroke-dasharray:5,stroke:red"));
    }

    lines.join("\n")
}
