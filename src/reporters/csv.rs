//! CSV reporter
//!
//! One row per edge (`source,kind,target`). Isolated nodes emit a single
//! row with an empty target column so they still appear in the output.

use crate::graph::ObjectGraph;
use anyhow::Result;

/// Render the graph as CSV
pub fn render(graph: &ObjectGraph) -> Result<String> {
    let mut out = String::from("source,kind,target\n");

    for node in graph.nodes() {
        if node.edges.is_empty() {
            out.push_str(&format!("{},{},\n", field(&node.name), node.kind));
            continue;
        }
        for edge in &node.edges {
            out.push_str(&format!(
                "{},{},{}\n",
                field(&node.name),
                node.kind,
                field(&edge.target)
            ));
        }
    }

    Ok(out)
}

/// Quote a field only when it contains a delimiter, quote, or newline
fn field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
