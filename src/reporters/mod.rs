//! Output reporters for resolved object graphs
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `csv` - One row per edge, for spreadsheets
//! - `html` - Standalone HTML report

mod csv;
mod html;
mod json;
mod text;

use crate::graph::ObjectGraph;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "html" | "htm" => Ok(OutputFormat::Html),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, csv, html",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

/// Render a graph in the specified format
pub fn report(graph: &ObjectGraph, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(graph, fmt)
}

/// Render a graph using an OutputFormat enum
pub fn report_with_format(graph: &ObjectGraph, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(graph),
        OutputFormat::Json => json::render(graph),
        OutputFormat::Csv => csv::render(graph),
        OutputFormat::Html => html::render(graph),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Html => "html",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Create a small resolved graph for testing
    pub(crate) fn test_graph() -> ObjectGraph {
        use crate::graph::{Association, Node};

        let mut user = Node::class("User");
        user.add_edge("Post");
        user.meta.push(Association::new("posts"));

        let mut post = Node::class("Post");
        post.add_edge("User");
        post.add_edge("Archive");
        post.meta
            .push(Association::new("user").with_option("touch", "true"));

        let billing = Node::module("Billing");

        let mut invoice = Node::class("Billing::Invoice");
        invoice.add_edge("User");

        let mut graph = ObjectGraph::new();
        for node in [user, post, billing, invoice] {
            graph.append(node);
        }
        graph
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("htm").unwrap(), OutputFormat::Html);
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in [
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Html,
        ] {
            assert_eq!(OutputFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }

    #[test]
    fn test_report_dispatches_every_format() {
        let graph = test_graph();
        for format in ["text", "json", "csv", "html"] {
            let rendered = report(&graph, format).unwrap();
            assert!(rendered.contains("User"), "{format} output misses node");
        }
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(OutputFormat::Text), "txt");
        assert_eq!(file_extension(OutputFormat::Html), "html");
    }
}
