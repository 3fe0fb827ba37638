//! Source code parsing using tree-sitter
//!
//! This module lowers Ruby source files into the reduced syntax tree the
//! analysis passes consume.

pub mod ruby;

/// File extensions routed to the Ruby parser during discovery.
pub fn supported_extensions() -> &'static [&'static str] {
    &["rb"]
}
