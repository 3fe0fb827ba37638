//! Generic syntax tree consumed by the analysis core.
//!
//! Parsers lower concrete tree-sitter trees into this closed set of node
//! shapes. Anything the analysis does not recognize becomes [`SyntaxNode::Opaque`]
//! with its children preserved, so unfamiliar syntax is skipped rather than
//! aborting a walk.

/// One node of the lowered source tree.
///
/// The enum is deliberately small: it models exactly the constructs the
/// namespace walker and reference extractor care about. Leaf tokens carry
/// their text; everything else carries lowered children in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// `module Name ... end`
    Module {
        name: Box<SyntaxNode>,
        body: Vec<SyntaxNode>,
    },
    /// `class Name ... end`. A superclass expression is lowered into the
    /// body so it is scanned like any other constant mention.
    Class {
        name: Box<SyntaxNode>,
        body: Vec<SyntaxNode>,
    },
    /// A constant or a scoped constant chain (`Foo`, `Foo::Bar`). The chain
    /// nests through `scope`; `name` is the innermost segment.
    ConstPath {
        scope: Option<Box<SyntaxNode>>,
        name: String,
    },
    /// A method invocation. An attached block does not appear here; the
    /// parser wraps call and block together in an [`SyntaxNode::Opaque`]
    /// container so block contents stay scannable in the enclosing scope.
    Call {
        receiver: Option<Box<SyntaxNode>>,
        method: String,
        args: Vec<SyntaxNode>,
    },
    /// Symbol literal, colon punctuation stripped (`:author` → `author`).
    Sym(String),
    /// String literal content, quotes stripped.
    Str(String),
    /// Any other single-token literal (`true`, `nil`, numbers), as written.
    Lit(String),
    /// One keyword or hash entry.
    Pair {
        key: Box<SyntaxNode>,
        value: Box<SyntaxNode>,
    },
    /// Unrecognized construct; children are still traversed.
    Opaque(Vec<SyntaxNode>),
}

impl SyntaxNode {
    /// Whether this node opens a new namespace scope.
    pub fn is_namespace(&self) -> bool {
        matches!(self, SyntaxNode::Module { .. } | SyntaxNode::Class { .. })
    }

    /// Flattens a constant chain into its segments, outermost first.
    ///
    /// Returns `None` for anything that is not a `ConstPath`. A non-constant
    /// scope link ends the chain, so `self.class::NAME` yields `["NAME"]`.
    pub fn const_segments(&self) -> Option<Vec<&str>> {
        match self {
            SyntaxNode::ConstPath { scope, name } => {
                let mut segments = match scope.as_deref() {
                    Some(inner) => inner.const_segments().unwrap_or_default(),
                    None => Vec::new(),
                };
                segments.push(name.as_str());
                Some(segments)
            }
            _ => None,
        }
    }

    /// The constant chain rendered as written (`Foo::Bar`), if this is one.
    pub fn const_path(&self) -> Option<String> {
        self.const_segments().map(|s| s.join("::"))
    }
}
