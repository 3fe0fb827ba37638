//! HTML reporter with embedded styles
//!
//! Generates a standalone HTML report that can be viewed in any browser.
//! Includes:
//! - Graph totals at a glance
//! - One card per class or module with its outgoing references
//! - Declared associations with their options
//! - Responsive design for mobile and desktop

use crate::graph::{GraphStats, Node, NodeKind, ObjectGraph};
use anyhow::Result;
use chrono::Local;

/// Render the graph as standalone HTML
pub fn render(graph: &ObjectGraph) -> Result<String> {
    let stats = graph.stats();
    let mut html = String::new();

    // DOCTYPE and head
    html.push_str(&render_head());

    // Body
    html.push_str("<body>\n<div class=\"container\">\n");

    // Header
    html.push_str(&render_header());

    // Content
    html.push_str("<div class=\"content\">\n");

    // Totals
    html.push_str(&render_stats(&stats));

    // Node cards
    html.push_str(&render_nodes(graph));

    html.push_str("</div>\n"); // content

    // Footer
    html.push_str(&render_footer());

    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Entwine Type Graph</title>
    <style>
{CSS}
    </style>
</head>
"#
    )
}

fn render_header() -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<div class="header">
    <h1>🕸 Entwine Type Graph</h1>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        timestamp
    )
}

fn render_stats(stats: &GraphStats) -> String {
    let dangling_note = if stats.dangling_edges > 0 {
        format!(
            "<p class=\"dangling-note\">{} reference{} could not be matched to a type defined in the analyzed sources.</p>\n",
            stats.dangling_edges,
            if stats.dangling_edges == 1 { "" } else { "s" }
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="section">
    <h2 class="section-title">📊 Graph Totals</h2>
    <div class="stats-grid">
        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">Nodes</div>
        </div>
        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">Classes</div>
        </div>
        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">Modules</div>
        </div>
        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">Edges</div>
        </div>
        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">Associations</div>
        </div>
    </div>
{}</div>
"#,
        stats.nodes, stats.classes, stats.modules, stats.edges, stats.associations, dangling_note
    )
}

fn render_nodes(graph: &ObjectGraph) -> String {
    if graph.is_empty() {
        return r#"<div class="section">
    <h2 class="section-title">No Types Found</h2>
    <p>No class or module declarations were found in the analyzed sources.</p>
</div>
"#
        .to_string();
    }

    let mut html = format!(
        r#"<div class="section">
    <h2 class="section-title">🧩 Types ({} total)</h2>
    <div class="node-list">
"#,
        graph.len()
    );

    for node in graph.nodes() {
        html.push_str(&render_node(graph, node));
    }

    html.push_str("    </div>\n</div>\n");
    html
}

fn render_node(graph: &ObjectGraph, node: &Node) -> String {
    let (kind_class, kind_label) = match node.kind {
        NodeKind::Class => ("kind-class", "class"),
        NodeKind::Module => ("kind-module", "module"),
    };

    let edges_html = if node.edges.is_empty() {
        "<div class=\"edge-item edge-none\">no outgoing references</div>".to_string()
    } else {
        let items: Vec<String> = node
            .edges
            .iter()
            .map(|edge| {
                let dangling = if graph.contains(&edge.target) {
                    ""
                } else {
                    " edge-dangling"
                };
                format!(
                    "<div class=\"edge-item{}\">&rarr; {}</div>",
                    dangling,
                    html_escape(&edge.target)
                )
            })
            .collect();
        items.join("\n")
    };

    let meta_html = if node.meta.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = node
            .meta
            .iter()
            .map(|assoc| {
                let options: Vec<String> = assoc
                    .options
                    .iter()
                    .map(|(key, value)| {
                        format!("{}: {}", html_escape(key), html_escape(value))
                    })
                    .collect();
                if options.is_empty() {
                    format!(
                        "<div class=\"assoc-item\">{}</div>",
                        html_escape(&assoc.reference)
                    )
                } else {
                    format!(
                        "<div class=\"assoc-item\">{} <span class=\"assoc-options\">({})</span></div>",
                        html_escape(&assoc.reference),
                        options.join(", ")
                    )
                }
            })
            .collect();
        format!(
            r#"<div class="assoc-list">
                <div class="assoc-label">Declared associations</div>
                {}
            </div>"#,
            items.join("\n")
        )
    };

    format!(
        r#"<div class="node-card">
        <div class="node-header">
            <span class="kind-badge {}">{}</span>
            <div class="node-name">{}</div>
        </div>
        <div class="node-body">
            <div class="edge-list">{}</div>
            {}
        </div>
    </div>
"#,
        kind_class,
        kind_label,
        html_escape(&node.name),
        edges_html,
        meta_html
    )
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by Entwine - Ruby type relationship explorer</p>
</div>
"#
    .to_string()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #6366f1;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1000px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #6366f1 0%, #8b5cf6 100%);
    color: white;
    padding: 3rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; }
.timestamp { opacity: 0.9; font-size: 0.875rem; }

.content { padding: 2rem; }

.section { margin-bottom: 2rem; }

.section-title {
    font-size: 1.25rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(120px, 1fr));
    gap: 1rem;
}

.stat-item {
    text-align: center;
    padding: 1rem;
    background: #f8fafc;
    border-radius: 8px;
}

.stat-value {
    font-size: 1.75rem;
    font-weight: 700;
    color: var(--primary-color);
}

.stat-label {
    font-size: 0.875rem;
    color: #64748b;
}

.dangling-note {
    margin-top: 1rem;
    color: #b45309;
    font-size: 0.875rem;
}

.node-list { display: flex; flex-direction: column; gap: 1rem; }

.node-card {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    overflow: hidden;
}

.node-header {
    padding: 1rem;
    background: #f8fafc;
    display: flex;
    align-items: center;
    gap: 1rem;
    flex-wrap: wrap;
}

.kind-badge {
    padding: 0.25rem 0.75rem;
    border-radius: 6px;
    font-size: 0.875rem;
    font-weight: 600;
    color: white;
    white-space: nowrap;
}

.kind-class { background: #059669; }
.kind-module { background: #2563eb; }

.node-name {
    flex: 1;
    font-weight: 600;
    font-family: monospace;
    font-size: 1rem;
}

.node-body { padding: 1rem; }

.edge-item {
    font-family: monospace;
    font-size: 0.875rem;
    padding: 0.25rem 0.5rem;
    color: var(--text-color);
}

.edge-dangling { color: #b45309; }
.edge-none { color: #94a3b8; font-style: italic; }

.assoc-list {
    margin-top: 1rem;
    padding: 1rem;
    background: #f8fafc;
    border-radius: 4px;
}

.assoc-label {
    font-weight: 600;
    color: #64748b;
    margin-bottom: 0.5rem;
    font-size: 0.875rem;
}

.assoc-item {
    font-family: monospace;
    font-size: 0.875rem;
    color: #64748b;
}

.assoc-options { color: #94a3b8; }

.footer {
    text-align: center;
    padding: 2rem;
    color: #64748b;
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 2rem 1rem; }
    .header h1 { font-size: 1.75rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .node-card { page-break-inside: avoid; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_graph;

    #[test]
    fn test_html_contains_nodes() {
        let graph = test_graph();
        let html = render(&graph).expect("render HTML");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("User"));
        assert!(html.contains("Billing::Invoice"));
        assert!(html.contains("kind-module"));
    }

    #[test]
    fn test_html_marks_dangling_edges() {
        let graph = test_graph();
        let html = render(&graph).expect("render HTML");
        assert!(html.contains("edge-dangling"));
    }

    #[test]
    fn test_html_escapes_names() {
        use crate::graph::Node;

        let mut graph = ObjectGraph::new();
        graph.append(Node::class("Evil<script>"));
        let html = render(&graph).expect("render HTML");

        assert!(html.contains("Evil&lt;script&gt;"));
        assert!(!html.contains("Evil<script>"));
    }
}
