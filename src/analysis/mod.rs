//! Graph construction from source units
//!
//! One source unit in, one raw [`ObjectGraph`] out: the namespace walker
//! isolates every class/module declaration, the reference extractor collects
//! each declaration's outgoing references, and the node builder folds the
//! results into a graph whose edges are still pending. Resolution over the
//! combined multi-unit graph lives in [`resolver`].

pub mod inflect;
pub mod namespaces;
pub mod references;
pub mod resolver;

pub use resolver::resolve;

use crate::graph::{Node, ObjectGraph};
use crate::parsers::ruby;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while analyzing a single source unit
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Malformed declaration in {}: {message}", path.display())]
    MalformedDeclaration { path: PathBuf, message: String },
}

impl AnalysisError {
    /// I/O failures abort the whole run; parse and structural failures stay
    /// scoped to their unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AnalysisError::Io { .. })
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Analyze one file into a raw graph with pending references.
pub fn analyze_file(path: &Path) -> AnalysisResult<ObjectGraph> {
    let source = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    analyze_source(&source, path)
}

/// Analyze source text directly (useful for testing). The path is only used
/// in error reporting.
pub fn analyze_source(source: &str, path: &Path) -> AnalysisResult<ObjectGraph> {
    let root = ruby::parse_source(source).map_err(|e| AnalysisError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let declarations =
        namespaces::walk(&root).map_err(|e| AnalysisError::MalformedDeclaration {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut graph = ObjectGraph::new();
    for declaration in &declarations {
        let name = declaration.qualified_name();
        let pending = references::extract(declaration.body, &name);
        graph.append(Node::new(name, declaration.kind).with_pending(pending));
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeKind, PendingRef};

    fn analyze(source: &str) -> ObjectGraph {
        analyze_source(source, Path::new("test.rb")).expect("should analyze source")
    }

    #[test]
    fn test_single_class_becomes_node() {
        let graph = analyze("class User\nend\n");

        assert_eq!(graph.len(), 1);
        let user = graph.get("User").unwrap();
        assert_eq!(user.kind, NodeKind::Class);
        assert!(user.edges.is_empty());
        assert!(user.pending.is_empty());
    }

    #[test]
    fn test_nested_declarations_get_qualified_names() {
        let graph = analyze(
            r#"
module Blog
  class Post
  end
end
"#,
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get("Blog").unwrap().kind, NodeKind::Module);
        assert_eq!(graph.get("Blog::Post").unwrap().kind, NodeKind::Class);
    }

    #[test]
    fn test_references_land_in_pending() {
        let graph = analyze(
            r#"
class Post
  belongs_to :author
  CACHE = Store
end
"#,
        );

        let post = graph.get("Post").unwrap();
        assert_eq!(post.pending.len(), 3);
        assert!(post
            .pending
            .contains(&PendingRef::Constant("Store".to_string())));
        assert!(post.edges.is_empty(), "raw graphs carry no resolved edges");
    }

    #[test]
    fn test_reopened_class_merges_into_one_node() {
        let graph = analyze(
            r#"
class Post
  belongs_to :author
end

class Post
  has_many :comments
end
"#,
        );

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("Post").unwrap().pending.len(), 2);
    }

    #[test]
    fn test_parse_failure_is_reported_with_path() {
        let err = analyze_source("class Post <", Path::new("broken.rb"))
            .expect_err("syntax errors should fail the unit");
        assert!(matches!(err, AnalysisError::Parse { .. }));
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("broken.rb"));
    }

    #[test]
    fn test_missing_file_is_fatal_io() {
        let err = analyze_file(Path::new("/nonexistent/model.rb"))
            .expect_err("missing files should fail");
        assert!(matches!(err, AnalysisError::Io { .. }));
        assert!(err.is_fatal());
    }
}
