//! JSON reporter
//!
//! Outputs the resolved graph as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::graph::ObjectGraph;
use anyhow::Result;

/// Render the graph as JSON
pub fn render(graph: &ObjectGraph) -> Result<String> {
    let envelope = serde_json::json!({ "nodes": graph });
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Render the graph as compact JSON (single line)
pub fn render_compact(graph: &ObjectGraph) -> Result<String> {
    let envelope = serde_json::json!({ "nodes": graph });
    Ok(serde_json::to_string(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_graph;

    #[test]
    fn test_json_render_valid() {
        let graph = test_graph();
        let json_str = render(&graph).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        let nodes = parsed["nodes"].as_array().expect("nodes array");
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0]["name"], "User");
        assert_eq!(nodes[0]["kind"], "class");
        assert_eq!(nodes[0]["edges"][0], "Post");
    }

    #[test]
    fn test_json_meta_includes_options() {
        let graph = test_graph();
        let json_str = render(&graph).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        let post_meta = &parsed["nodes"][1]["meta"][0];
        assert_eq!(post_meta["reference"], "user");
        assert_eq!(post_meta["touch"], "true");
    }

    #[test]
    fn test_json_render_compact() {
        let graph = test_graph();
        let json_str = render_compact(&graph).expect("render compact JSON");
        assert!(!json_str.contains('\n'));
        let _: serde_json::Value = serde_json::from_str(&json_str).expect("parse compact JSON");
    }

    #[test]
    fn test_json_empty_graph() {
        let json_str = render(&ObjectGraph::new()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["nodes"].as_array().expect("nodes array").len(), 0);
    }
}
