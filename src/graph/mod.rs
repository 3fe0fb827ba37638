//! Object graph of declared types and their relationships.
//!
//! Nodes are keyed by fully-qualified name and hold resolved edges,
//! association metadata, and (until resolution) pending references. Graphs
//! merge by name: reopened namespaces and per-file graphs union into one
//! combined graph with deduplicated contents, preserving first-appearance
//! order for reproducible reports.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of namespace a node was declared as.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Class,
    Module,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Class => write!(f, "class"),
            NodeKind::Module => write!(f, "module"),
        }
    }
}

/// A directed relationship to another named type. Serializes as the bare
/// target name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Edge {
    pub target: String,
}

impl Edge {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// One declared association: the reference token plus its decoded keyword
/// options. Serializes flat, `reference` first.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Association {
    pub reference: String,
    #[serde(flatten)]
    pub options: IndexMap<String, String>,
}

impl Association {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }

    /// Looks up a keyword option by its normalized key.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// An unresolved reference recorded during extraction, consumed by the
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRef {
    /// A plain constant mention, as written (`A`, `Outer::Inner`).
    Constant(String),
    /// A declarative association invocation.
    Association(Association),
}

/// A declared type in the graph. Identity is the fully-qualified name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub edges: Vec<Edge>,
    pub meta: Vec<Association>,
    #[serde(skip)]
    pub pending: Vec<PendingRef>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            edges: Vec::new(),
            meta: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Class)
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Module)
    }

    pub fn with_pending(mut self, pending: Vec<PendingRef>) -> Self {
        self.pending = pending;
        self
    }

    /// Adds an edge unless one with the same target already exists.
    pub fn add_edge(&mut self, target: impl Into<String>) {
        let edge = Edge::new(target);
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub fn has_edge(&self, target: &str) -> bool {
        self.edges.iter().any(|e| e.target == target)
    }

    /// Unions another same-named node into this one. Edges, meta records,
    /// and pending references from `other` are appended only when not
    /// already present. On a kind conflict the first-seen kind wins.
    pub fn merge(&mut self, other: Node) {
        for edge in other.edges {
            if !self.edges.contains(&edge) {
                self.edges.push(edge);
            }
        }
        for record in other.meta {
            if !self.meta.contains(&record) {
                self.meta.push(record);
            }
        }
        for reference in other.pending {
            if !self.pending.contains(&reference) {
                self.pending.push(reference);
            }
        }
    }
}

/// Derived counts over one graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub classes: usize,
    pub modules: usize,
    pub edges: usize,
    /// Edges whose target names no node in the graph.
    pub dangling_edges: usize,
    pub associations: usize,
}

/// Insertion-ordered collection of nodes keyed by fully-qualified name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectGraph {
    nodes: IndexMap<String, Node>,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions a single node into the graph.
    pub fn append(&mut self, node: Node) {
        match self.nodes.get_mut(&node.name) {
            Some(existing) => existing.merge(node),
            None => {
                self.nodes.insert(node.name.clone(), node);
            }
        }
    }

    /// Node-wise union of another graph into this one.
    pub fn union(&mut self, other: ObjectGraph) {
        for (_, node) in other.nodes {
            self.append(node);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Nodes in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            nodes: self.nodes.len(),
            ..GraphStats::default()
        };
        for node in self.nodes.values() {
            match node.kind {
                NodeKind::Class => stats.classes += 1,
                NodeKind::Module => stats.modules += 1,
            }
            stats.edges += node.edges.len();
            stats.associations += node.meta.len();
            stats.dangling_edges += node
                .edges
                .iter()
                .filter(|e| !self.nodes.contains_key(&e.target))
                .count();
        }
        stats
    }
}

impl Serialize for ObjectGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.nodes.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with_edges(name: &str, targets: &[&str]) -> Node {
        let mut node = Node::class(name);
        for target in targets {
            node.add_edge(*target);
        }
        node
    }

    #[test]
    fn test_add_edge_dedups_by_target() {
        let mut node = Node::class("Post");
        node.add_edge("User");
        node.add_edge("User");
        node.add_edge("Tag");
        assert_eq!(node.edges.len(), 2);
        assert!(node.has_edge("User"));
        assert!(node.has_edge("Tag"));
    }

    #[test]
    fn test_append_merges_same_name() {
        let mut graph = ObjectGraph::new();
        graph.append(node_with_edges("Post", &["User"]));
        graph.append(node_with_edges("Post", &["User", "Tag"]));

        assert_eq!(graph.len(), 1);
        let post = graph.get("Post").unwrap();
        assert_eq!(post.edges.len(), 2);
    }

    #[test]
    fn test_union_combines_node_name_sets() {
        let mut left = ObjectGraph::new();
        left.append(node_with_edges("A", &["B"]));
        left.append(node_with_edges("B", &[]));

        let mut right = ObjectGraph::new();
        right.append(node_with_edges("A", &["C"]));
        right.append(node_with_edges("C", &[]));

        left.union(right);

        assert_eq!(left.len(), 3);
        let a = left.get("A").unwrap();
        assert!(a.has_edge("B"));
        assert!(a.has_edge("C"));
        assert_eq!(a.edges.len(), 2);
    }

    #[test]
    fn test_union_is_idempotent() {
        let mut graph = ObjectGraph::new();
        let mut node = node_with_edges("Post", &["User", "Tag"]);
        node.meta
            .push(Association::new("author").with_option("class_name", "User"));
        node.pending.push(PendingRef::Constant("User".to_string()));
        graph.append(node);
        graph.append(Node::module("Blog"));

        let copy = graph.clone();
        graph.union(copy);

        let mut expected = ObjectGraph::new();
        let mut node = node_with_edges("Post", &["User", "Tag"]);
        node.meta
            .push(Association::new("author").with_option("class_name", "User"));
        node.pending.push(PendingRef::Constant("User".to_string()));
        expected.append(node);
        expected.append(Node::module("Blog"));

        assert_eq!(graph, expected);
    }

    #[test]
    fn test_union_preserves_first_appearance_order() {
        let mut left = ObjectGraph::new();
        left.append(Node::class("B"));
        left.append(Node::class("A"));

        let mut right = ObjectGraph::new();
        right.append(Node::class("C"));
        right.append(Node::class("A"));

        left.union(right);

        let names: Vec<&str> = left.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_kind_conflict_keeps_first_seen() {
        let mut graph = ObjectGraph::new();
        graph.append(Node::module("X"));
        graph.append(Node::class("X"));
        assert_eq!(graph.get("X").unwrap().kind, NodeKind::Module);
    }

    #[test]
    fn test_node_serialization_shape() {
        let mut node = Node::class("Post");
        node.add_edge("User");
        node.meta
            .push(Association::new("author").with_option("class_name", "User"));
        node.pending.push(PendingRef::Constant("Hidden".to_string()));

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Post",
                "kind": "class",
                "edges": ["User"],
                "meta": [{"reference": "author", "class_name": "User"}]
            })
        );
    }

    #[test]
    fn test_graph_serializes_in_order() {
        let mut graph = ObjectGraph::new();
        graph.append(Node::class("B"));
        graph.append(Node::module("A"));

        let value = serde_json::to_value(&graph).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_stats_counts_dangling_edges() {
        let mut graph = ObjectGraph::new();
        graph.append(node_with_edges("Post", &["User", "Ghost"]));
        graph.append(Node::class("User"));
        graph.append(Node::module("Blog"));

        let stats = graph.stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.classes, 2);
        assert_eq!(stats.modules, 1);
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.dangling_edges, 1);
        assert_eq!(stats.associations, 0);
    }
}
