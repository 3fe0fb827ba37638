//! Namespace walker
//!
//! Isolates every class/module declaration in a lowered source unit and
//! computes its fully-qualified namespace path. Reopened namespaces yield
//! one entry per reopening; the graph layer merges them by name.

use crate::graph::NodeKind;
use crate::syntax::SyntaxNode;
use std::collections::VecDeque;
use thiserror::Error;

/// A class or module header with no recoverable constant name.
#[derive(Error, Debug)]
#[error("declaration header has no constant name")]
pub struct MalformedHeader;

/// One isolated declaration: the namespace path leading to it plus its
/// body, borrowed from the lowered tree.
#[derive(Debug)]
pub struct ScopedDeclaration<'a> {
    pub path: Vec<String>,
    pub kind: NodeKind,
    pub body: &'a [SyntaxNode],
}

impl ScopedDeclaration<'_> {
    pub fn qualified_name(&self) -> String {
        self.path.join("::")
    }
}

/// Walk one lowered source unit and return every declaration at any depth,
/// in discovery order: each nesting level in source order, outer levels
/// before the declarations nested inside them.
pub fn walk(unit: &SyntaxNode) -> Result<Vec<ScopedDeclaration<'_>>, MalformedHeader> {
    let mut declarations = Vec::new();
    let mut worklist: VecDeque<(Vec<String>, &SyntaxNode)> = VecDeque::new();

    enqueue_nested(std::slice::from_ref(unit), &[], &mut worklist);

    while let Some((parent, declaration)) = worklist.pop_front() {
        let (name, kind, body) = match declaration {
            SyntaxNode::Class { name, body } => (name, NodeKind::Class, body),
            SyntaxNode::Module { name, body } => (name, NodeKind::Module, body),
            _ => continue,
        };

        let segments = name.const_segments().ok_or(MalformedHeader)?;
        let mut path = parent;
        path.extend(segments.iter().map(|s| s.to_string()));

        enqueue_nested(body, &path, &mut worklist);
        declarations.push(ScopedDeclaration { path, kind, body });
    }

    Ok(declarations)
}

/// Scan for declarations reachable without crossing another declaration
/// boundary. Each one found becomes a work item under `parent`; everything
/// else is descended through so declarations inside blocks and argument
/// lists are not missed.
fn enqueue_nested<'a>(
    nodes: &'a [SyntaxNode],
    parent: &[String],
    worklist: &mut VecDeque<(Vec<String>, &'a SyntaxNode)>,
) {
    let mut stack: Vec<&'a SyntaxNode> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.is_namespace() {
            worklist.push_back((parent.to_vec(), node));
            continue;
        }
        match node {
            SyntaxNode::Call { receiver, args, .. } => {
                for arg in args.iter().rev() {
                    stack.push(arg);
                }
                if let Some(receiver) = receiver {
                    stack.push(receiver);
                }
            }
            SyntaxNode::Pair { key, value } => {
                stack.push(value);
                stack.push(key);
            }
            SyntaxNode::Opaque(children) => {
                for child in children.iter().rev() {
                    stack.push(child);
                }
            }
            _ => {}
        }
    }
}
