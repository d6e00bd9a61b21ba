//! Arena-backed immutable syntax tree
//!
//! Nodes live in an append-only arena and are addressed by `NodeId`.
//! A node is never mutated after allocation: an edit allocates a new slot
//! and the parent is re-pointed at it, so every id handed out stays valid
//! and untouched subtrees are shared between the old and new tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A syntactic unit.
///
/// The set of kinds is closed: the rewriter matches exhaustively, so a
/// new kind fails to compile until every traversal handles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Named declaration owning a body of members
    Declaration(Declaration),
    /// Body item of a declaration
    Member(Member),
    /// Statement; carries no renameable identity
    Statement(Statement),
    /// Leaf run of source text; carries no renameable identity
    Expression(Expression),
}

/// A declaration with a name token and member body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declared name token
    pub name: String,
    /// Body members, in source order
    pub members: Vec<NodeId>,
}

/// A member wrapping child nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Child nodes, in source order
    pub children: Vec<NodeId>,
}

/// A statement wrapping child nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Child nodes, in source order
    pub children: Vec<NodeId>,
}

/// A leaf holding source text verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    /// Source text, preserved exactly
    pub text: String,
}

/// Append-only storage for syntax nodes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxArena {
    nodes: Vec<Node>,
}

impl SyntaxArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a new slot for `node`
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a declaration node
    pub fn declaration(&mut self, name: impl Into<String>, members: Vec<NodeId>) -> NodeId {
        self.alloc(Node::Declaration(Declaration {
            name: name.into(),
            members,
        }))
    }

    /// Allocate a member node
    pub fn member(&mut self, children: Vec<NodeId>) -> NodeId {
        self.alloc(Node::Member(Member { children }))
    }

    /// Allocate a statement node
    pub fn statement(&mut self, children: Vec<NodeId>) -> NodeId {
        self.alloc(Node::Statement(Statement { children }))
    }

    /// Allocate an expression leaf
    pub fn expression(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::Expression(Expression { text: text.into() }))
    }

    /// Look up a node, if the id belongs to this arena
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Number of allocated nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for SyntaxArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }
}

/// A syntax tree: an arena plus the current root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxTree {
    /// Node storage shared by every version of the tree
    pub arena: SyntaxArena,
    /// Root of the current version
    pub root: NodeId,
}

impl SyntaxTree {
    /// Wrap an arena and its root node
    pub fn new(arena: SyntaxArena, root: NodeId) -> Self {
        Self { arena, root }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        match &self.arena[id] {
            Node::Declaration(decl) => {
                write!(f, "(decl {}", decl.name)?;
                for &member in &decl.members {
                    write!(f, " ")?;
                    self.fmt_node(f, member)?;
                }
                write!(f, ")")
            }
            Node::Member(member) => {
                write!(f, "(member")?;
                for &child in &member.children {
                    write!(f, " ")?;
                    self.fmt_node(f, child)?;
                }
                write!(f, ")")
            }
            Node::Statement(stmt) => {
                write!(f, "(stmt")?;
                for &child in &stmt.children {
                    write!(f, " ")?;
                    self.fmt_node(f, child)?;
                }
                write!(f, ")")
            }
            Node::Expression(expr) => write!(f, "{:?}", expr.text),
        }
    }
}

/// Diagnostic s-expression dump; printing real source is the concern of
/// an external printer
impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root)
    }
}
