//! # Entwine - Ruby type relationship explorer
//!
//! Parses Ruby sources into a directed graph of type relationships.
//!
//! Entwine provides:
//! - A tree-sitter based Ruby parser lowered into a small syntax tree
//! - Namespace walking that yields every class and module declaration
//! - Reference extraction for plain constants and Rails-style associations
//! - Convention-based resolution (class_name, through, polymorphic, inflection)
//! - Text, JSON, CSV, and HTML reporters over the resolved graph

pub mod analysis;
pub mod cli;
pub mod config;
pub mod graph;
pub mod parsers;
pub mod pipeline;
pub mod reporters;
pub mod syntax;

// Re-exports for convenient access
pub use analysis::{AnalysisError, AnalysisResult};
pub use graph::{Association, Edge, Node, NodeKind, ObjectGraph};
pub use pipeline::Pipeline;
pub use reporters::OutputFormat;
pub use syntax::SyntaxNode;
