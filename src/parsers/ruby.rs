//! Ruby parser using tree-sitter
//!
//! Lowers the concrete syntax tree into the reduced [`SyntaxNode`] shapes
//! the namespace walker and reference extractor understand. Everything the
//! analysis passes do not care about collapses into [`SyntaxNode::Opaque`]
//! containers so constant mentions inside arbitrary expressions stay
//! reachable.

use crate::syntax::SyntaxNode;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parse a Ruby file into a lowered syntax tree
pub fn parse(path: &Path) -> Result<SyntaxNode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_source(&source)
}

/// Parse Ruby source code directly (useful for testing)
pub fn parse_source(source: &str) -> Result<SyntaxNode> {
    let mut parser = Parser::new();
    let language = tree_sitter_ruby::LANGUAGE;
    parser
        .set_language(&language.into())
        .context("Failed to set Ruby language")?;

    let tree = parser
        .parse(source, None)
        .context("Failed to parse Ruby source")?;

    let root = tree.root_node();
    if root.has_error() {
        bail!("Ruby source contains syntax errors");
    }

    Ok(SyntaxNode::Opaque(lower_children(&root, source.as_bytes())))
}

/// Lower one CST node. Nodes with no analysis-relevant content return `None`
/// and disappear from the tree.
fn lower(node: &Node, source: &[u8]) -> Option<SyntaxNode> {
    match node.kind() {
        "module" => Some(lower_namespace(node, source, false)),
        "class" => Some(lower_namespace(node, source, true)),
        "constant" => Some(SyntaxNode::ConstPath {
            scope: None,
            name: text(node, source),
        }),
        "scope_resolution" => Some(lower_scope_resolution(node, source)),
        "call" => Some(lower_call(node, source)),
        "simple_symbol" => Some(SyntaxNode::Sym(
            text(node, source).trim_start_matches(':').to_string(),
        )),
        "hash_key_symbol" => Some(SyntaxNode::Sym(text(node, source))),
        "string" => Some(SyntaxNode::Str(string_content(node, source))),
        "true" | "false" | "nil" | "integer" | "float" => {
            Some(SyntaxNode::Lit(text(node, source)))
        }
        "pair" => lower_pair(node, source),
        "comment" => None,
        _ => {
            let children = lower_children(node, source);
            if children.is_empty() {
                None
            } else {
                Some(SyntaxNode::Opaque(children))
            }
        }
    }
}

fn lower_children(node: &Node, source: &[u8]) -> Vec<SyntaxNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|child| lower(&child, source))
        .collect()
}

/// Lower a `class` or `module` declaration. The superclass expression, when
/// present, is folded into the front of the body so it is scanned like any
/// other constant mention.
fn lower_namespace(node: &Node, source: &[u8], is_class: bool) -> SyntaxNode {
    let Some(name) = node
        .child_by_field_name("name")
        .and_then(|n| lower(&n, source))
    else {
        return SyntaxNode::Opaque(lower_children(node, source));
    };

    let mut body = Vec::new();
    if let Some(superclass) = node.child_by_field_name("superclass") {
        body.extend(lower_children(&superclass, source));
    }
    if let Some(body_node) = node.child_by_field_name("body") {
        body.extend(lower_children(&body_node, source));
    }

    let name = Box::new(name);
    if is_class {
        SyntaxNode::Class { name, body }
    } else {
        SyntaxNode::Module { name, body }
    }
}

fn lower_scope_resolution(node: &Node, source: &[u8]) -> SyntaxNode {
    let scope = node
        .child_by_field_name("scope")
        .and_then(|n| lower(&n, source))
        .map(Box::new);
    let name = node
        .child_by_field_name("name")
        .map(|n| text(&n, source))
        .unwrap_or_default();
    SyntaxNode::ConstPath { scope, name }
}

/// Lower a method call. Receiver presence is judged on the CST field so a
/// receiver the lowering cannot represent still counts as a receiver.
fn lower_call(node: &Node, source: &[u8]) -> SyntaxNode {
    let receiver = node.child_by_field_name("receiver").map(|n| {
        Box::new(lower(&n, source).unwrap_or_else(|| SyntaxNode::Opaque(Vec::new())))
    });
    let method = node
        .child_by_field_name("method")
        .map(|n| text(&n, source))
        .unwrap_or_default();

    let mut args = Vec::new();
    if let Some(arguments) = node.child_by_field_name("arguments") {
        args.extend(lower_children(&arguments, source));
    }

    let call = SyntaxNode::Call {
        receiver,
        method,
        args,
    };

    // A block wraps the invocation it is attached to. Keeping it outside the
    // argument list means block contents are scanned in the enclosing scope
    // and never decoded as keyword options.
    match node
        .child_by_field_name("block")
        .and_then(|b| lower(&b, source))
    {
        Some(block) => SyntaxNode::Opaque(vec![call, block]),
        None => call,
    }
}

fn lower_pair(node: &Node, source: &[u8]) -> Option<SyntaxNode> {
    let key_node = node.child_by_field_name("key")?;
    let value_node = node.child_by_field_name("value")?;
    let key = lower(&key_node, source)?;
    let value = lower(&value_node, source)?;
    Some(SyntaxNode::Pair {
        key: Box::new(key),
        value: Box::new(value),
    })
}

fn text(node: &Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

/// Concatenate the literal fragments of a string node, skipping
/// interpolations.
fn string_content(node: &Node, source: &[u8]) -> String {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() == "string_content")
        .filter_map(|child| child.utf8_text(source).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_root(source: &str) -> Vec<SyntaxNode> {
        match parse_source(source).expect("should parse Ruby source") {
            SyntaxNode::Opaque(children) => children,
            other => panic!("unexpected root node: {:?}", other),
        }
    }

    fn constant(name: &str) -> SyntaxNode {
        SyntaxNode::ConstPath {
            scope: None,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_class_with_superclass() {
        let source = r#"
class Post < ApplicationRecord
end
"#;
        let nodes = parse_root(source);

        assert_eq!(
            nodes,
            vec![SyntaxNode::Class {
                name: Box::new(constant("Post")),
                body: vec![constant("ApplicationRecord")],
            }]
        );
    }

    #[test]
    fn test_parse_scoped_class_name() {
        let source = r#"
class Admin::User
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { name, .. } = &nodes[0] else {
            panic!("expected a class, got {:?}", nodes[0]);
        };
        assert_eq!(name.const_path().as_deref(), Some("Admin::User"));
    }

    #[test]
    fn test_parse_module_nesting() {
        let source = r#"
module Blog
  class Post
  end
end
"#;
        let nodes = parse_root(source);

        assert_eq!(
            nodes,
            vec![SyntaxNode::Module {
                name: Box::new(constant("Blog")),
                body: vec![SyntaxNode::Class {
                    name: Box::new(constant("Post")),
                    body: vec![],
                }],
            }]
        );
    }

    #[test]
    fn test_parse_association_call() {
        let source = r#"
class Post
  belongs_to :author, class_name: "User"
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { body, .. } = &nodes[0] else {
            panic!("expected a class");
        };
        assert_eq!(
            body[0],
            SyntaxNode::Call {
                receiver: None,
                method: "belongs_to".to_string(),
                args: vec![
                    SyntaxNode::Sym("author".to_string()),
                    SyntaxNode::Pair {
                        key: Box::new(SyntaxNode::Sym("class_name".to_string())),
                        value: Box::new(SyntaxNode::Str("User".to_string())),
                    },
                ],
            }
        );
    }

    #[test]
    fn test_parse_braced_options_hash() {
        let source = r#"
class Doc
  has_many :tags, { through: :taggings }
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { body, .. } = &nodes[0] else {
            panic!("expected a class");
        };
        let SyntaxNode::Call { args, .. } = &body[0] else {
            panic!("expected a call, got {:?}", body[0]);
        };
        assert_eq!(args[0], SyntaxNode::Sym("tags".to_string()));
        assert_eq!(
            args[1],
            SyntaxNode::Opaque(vec![SyntaxNode::Pair {
                key: Box::new(SyntaxNode::Sym("through".to_string())),
                value: Box::new(SyntaxNode::Sym("taggings".to_string())),
            }])
        );
    }

    #[test]
    fn test_parse_boolean_option_value() {
        let source = r#"
class Comment
  belongs_to :commentable, polymorphic: true
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { body, .. } = &nodes[0] else {
            panic!("expected a class");
        };
        let SyntaxNode::Call { args, .. } = &body[0] else {
            panic!("expected a call");
        };
        assert_eq!(
            args[1],
            SyntaxNode::Pair {
                key: Box::new(SyntaxNode::Sym("polymorphic".to_string())),
                value: Box::new(SyntaxNode::Lit("true".to_string())),
            }
        );
    }

    #[test]
    fn test_receiver_is_preserved() {
        let source = r#"
class Post
  Registry.has_many :entries
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { body, .. } = &nodes[0] else {
            panic!("expected a class");
        };
        let SyntaxNode::Call { receiver, .. } = &body[0] else {
            panic!("expected a call");
        };
        assert!(receiver.is_some());
    }

    #[test]
    fn test_singleton_class_is_not_a_declaration() {
        let source = r#"
class Post
  class << self
    def lookup
      Cache
    end
  end
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { body, .. } = &nodes[0] else {
            panic!("expected a class");
        };
        assert!(
            !body
                .iter()
                .any(|n| matches!(n, SyntaxNode::Class { .. } | SyntaxNode::Module { .. })),
            "singleton class should lower to an opaque container"
        );
        // The constant inside remains reachable for scanning.
        fn contains_cache(node: &SyntaxNode) -> bool {
            match node {
                SyntaxNode::ConstPath { name, .. } => name == "Cache",
                SyntaxNode::Opaque(children) => children.iter().any(contains_cache),
                SyntaxNode::Call { args, .. } => args.iter().any(contains_cache),
                _ => false,
            }
        }
        assert!(body.iter().any(contains_cache));
    }

    #[test]
    fn test_syntax_errors_are_rejected() {
        let source = "class Post <";
        assert!(parse_source(source).is_err());
    }

    #[test]
    fn test_constant_assignment_value_is_scannable() {
        let source = r#"
class Config
  BACKEND = Redis::Store
end
"#;
        let nodes = parse_root(source);

        let SyntaxNode::Class { body, .. } = &nodes[0] else {
            panic!("expected a class");
        };
        // Assignment lowers to an opaque container holding both sides.
        let SyntaxNode::Opaque(parts) = &body[0] else {
            panic!("expected an opaque assignment, got {:?}", body[0]);
        };
        assert!(parts.contains(&constant("BACKEND")));
        assert!(parts.iter().any(|n| matches!(
            n,
            SyntaxNode::ConstPath { name, .. } if name == "Store"
        )));
    }
}
