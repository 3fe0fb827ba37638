//! Text (terminal) reporter with colors and formatting

use crate::graph::{NodeKind, ObjectGraph};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Kind colors (ANSI escape codes)
fn kind_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Class => "\x1b[32m",  // Green
        NodeKind::Module => "\x1b[34m", // Blue
    }
}

/// Render the graph as formatted terminal output
pub fn render(graph: &ObjectGraph) -> Result<String> {
    let stats = graph.stats();
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}Entwine Graph{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Nodes: {BOLD}{}{RESET} ({} classes, {} modules)  Edges: {BOLD}{}{RESET}  Associations: {}\n",
        stats.nodes, stats.classes, stats.modules, stats.edges, stats.associations
    ));
    if stats.dangling_edges > 0 {
        out.push_str(&format!(
            "{DIM}{} edges point at types not defined in the analyzed sources{RESET}\n",
            stats.dangling_edges
        ));
    }
    out.push('\n');

    // One block per node, in discovery order
    for node in graph.nodes() {
        let kind_c = kind_color(node.kind);
        out.push_str(&format!(
            "{kind_c}{:<7}{RESET}{BOLD}{}{RESET}\n",
            node.kind, node.name
        ));

        for edge in &node.edges {
            if graph.contains(&edge.target) {
                out.push_str(&format!("  -> {}\n", edge.target));
            } else {
                out.push_str(&format!(
                    "  -> {}  {DIM}(not defined here){RESET}\n",
                    edge.target
                ));
            }
        }
    }

    if graph.is_empty() {
        out.push_str(&format!("{DIM}No classes or modules found.{RESET}\n"));
    }

    Ok(out)
}
