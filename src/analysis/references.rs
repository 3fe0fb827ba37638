//! Reference extraction
//!
//! Scans one declaration body for outgoing references: plain constant
//! mentions, rendered as written, and declarative association invocations
//! (`belongs_to` and friends) decoded into a reference name plus literal
//! keyword options. Content inside nested declarations belongs to those
//! declarations and is skipped here.

use crate::graph::{Association, PendingRef};
use crate::syntax::SyntaxNode;
use indexmap::IndexMap;

/// The four command names recognized as association declarations.
pub const ASSOCIATION_COMMANDS: [&str; 4] = [
    "belongs_to",
    "has_one",
    "has_many",
    "has_and_belongs_to_many",
];

/// Collect every reference in `body`, in source order. `own_name` is the
/// declaring type's fully-qualified name; constant mentions equal to it are
/// dropped as self-references.
pub fn extract(body: &[SyntaxNode], own_name: &str) -> Vec<PendingRef> {
    let mut refs = Vec::new();
    let mut stack: Vec<&SyntaxNode> = body.iter().rev().collect();

    while let Some(node) = stack.pop() {
        match node {
            // Nested declarations own their content.
            SyntaxNode::Module { .. } | SyntaxNode::Class { .. } => {}
            SyntaxNode::ConstPath { .. } => {
                if let Some(path) = node.const_path() {
                    if path != own_name {
                        refs.push(PendingRef::Constant(path));
                    }
                }
            }
            SyntaxNode::Call {
                receiver,
                method,
                args,
            } => match decode_association(receiver.as_deref(), method, args) {
                Some(association) => refs.push(PendingRef::Association(association)),
                None => {
                    for arg in args.iter().rev() {
                        stack.push(arg);
                    }
                    if let Some(receiver) = receiver {
                        stack.push(receiver);
                    }
                }
            },
            SyntaxNode::Pair { key, value } => {
                stack.push(value);
                stack.push(key);
            }
            SyntaxNode::Opaque(children) => {
                for child in children.iter().rev() {
                    stack.push(child);
                }
            }
            SyntaxNode::Sym(_) | SyntaxNode::Str(_) | SyntaxNode::Lit(_) => {}
        }
    }

    refs
}

/// Decode one call as an association declaration, or return `None` when it
/// does not fit the shape: one of the four command names, no receiver, and
/// a symbol first argument.
fn decode_association(
    receiver: Option<&SyntaxNode>,
    method: &str,
    args: &[SyntaxNode],
) -> Option<Association> {
    if receiver.is_some() || !ASSOCIATION_COMMANDS.contains(&method) {
        return None;
    }
    let (first, rest) = args.split_first()?;
    let SyntaxNode::Sym(reference) = first else {
        return None;
    };

    let mut association = Association::new(reference.clone());
    decode_options(rest, &mut association.options);
    Some(association)
}

/// Capture keyword options with single-literal values. Entries are accepted
/// bare or one level inside a braced trailing hash; computed values and
/// non-label keys are silently omitted.
fn decode_options(args: &[SyntaxNode], options: &mut IndexMap<String, String>) {
    for arg in args {
        match arg {
            SyntaxNode::Pair { .. } => decode_pair(arg, options),
            SyntaxNode::Opaque(children) => {
                for child in children {
                    if matches!(child, SyntaxNode::Pair { .. }) {
                        decode_pair(child, options);
                    }
                }
            }
            _ => {}
        }
    }
}

fn decode_pair(pair: &SyntaxNode, options: &mut IndexMap<String, String>) {
    let SyntaxNode::Pair { key, value } = pair else {
        return;
    };
    let Some(key) = label_text(key) else {
        return;
    };
    let Some(value) = literal_text(value) else {
        return;
    };
    options.insert(key, value);
}

/// A usable option key: a symbol or string label, trailing colon stripped.
fn label_text(node: &SyntaxNode) -> Option<String> {
    match node {
        SyntaxNode::Sym(text) | SyntaxNode::Str(text) => {
            Some(text.trim_end_matches(':').to_string())
        }
        _ => None,
    }
}

/// A usable option value: any single-token literal, as written.
fn literal_text(node: &SyntaxNode) -> Option<String> {
    match node {
        SyntaxNode::Sym(text) | SyntaxNode::Str(text) | SyntaxNode::Lit(text) => {
            Some(text.clone())
        }
        _ => None,
    }
}
