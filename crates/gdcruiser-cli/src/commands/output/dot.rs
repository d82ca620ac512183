//! GraphViz DOT rendering.

use super::{short_path, Report};

const CYCLE_FILL: &str = "#ffcccc";

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

pub(super) fn render(report: &Report<'_>) -> String {
    let graph = &report.analysis.graph;
    let cycles = report.cycle_index();

    let mut lines = vec![
        "digraph dependencies {".to_string(),
        "    rankdir=LR;".to_string(),
        "    node [shape=box, fontname=\"monospace\"];".to_string(),
        "    edge [fontname=\"monospace\", fontsize=10];".to_string(),
        String::new(),
    ];

    for module in graph.all_modules() {
        let short = short_path(&module.path).replace('"', "\\\"");
        let label = match &module.class_name {
            Some(name) => format!("{name}\\n{short}"),
            None => short,
        };
        let style = if cycles.contains_key(module.path.as_str()) {
            format!(", style=filled, fillcolor=\"{CYCLE_FILL}\"")
        } else {
            String::new()
        };
        lines.push(format!(
            "    {} [label=\"{label}\"{style}];",
            quote(&module.path)
        ));
    }

    lines.push(String::new());

    for module in graph.all_modules() {
        for dep in &module.dependencies {
            let mut attrs = vec![format!("label=\"{}\"", dep.kind.label())];
            if !dep.resolved {
                attrs.push("style=dashed".to_string());
                attrs.push("color=\"red\"".to_string());
            }
            if Report::is_cycle_edge(&cycles, &module.path, &dep.target) {
                attrs.push("color=\"red\"".to_string());
                attrs.push("penwidth=2".to_string());
            }
            lines.push(format!(
                "    {} -> {} [{}];",
                quote(&module.path),
                quote(&dep.target),
                attrs.join(", ")
            ));
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}
