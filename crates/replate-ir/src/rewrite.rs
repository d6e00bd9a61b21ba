//! Clone-on-write renaming over the syntax tree
//!
//! The rewriter never mutates an existing node. A declaration whose name
//! resolves to something new, or any node with a changed child, gets a
//! fresh arena slot; unchanged children keep their ids, so every subtree
//! without a rename is shared between the old and new tree by identity.
//! When nothing matches, the original root comes back and the arena is
//! untouched.

use tracing::debug;

use crate::rules::RuleSet;
use crate::syntax::{Node, NodeId, SyntaxArena};

/// Rewrites a syntax tree against a rule set, sharing untouched subtrees
pub struct TreeRewriter<'a> {
    rules: &'a RuleSet,
    renamed: usize,
}

impl<'a> TreeRewriter<'a> {
    /// Create a rewriter for the given rule set
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules, renamed: 0 }
    }

    /// Number of declarations renamed so far
    pub fn renamed(&self) -> usize {
        self.renamed
    }

    /// Rewrite the tree rooted at `root`.
    ///
    /// Returns the new root if any declaration under it was renamed, or
    /// `root` itself (same identity) if the pass was a no-op.
    pub fn rewrite(&mut self, arena: &mut SyntaxArena, root: NodeId) -> NodeId {
        self.rewrite_node(arena, root).unwrap_or(root)
    }

    /// Rewrite one node, returning its replacement id if anything under
    /// it (including its own name) changed.
    fn rewrite_node(&mut self, arena: &mut SyntaxArena, id: NodeId) -> Option<NodeId> {
        // Clone the node data up front; recursion below needs `&mut arena`.
        match arena[id].clone() {
            Node::Declaration(decl) => {
                let new_name = self
                    .rules
                    .resolve(&decl.name)
                    .filter(|name| *name != decl.name);
                let new_members = self.rewrite_children(arena, &decl.members);
                if new_name.is_none() && new_members.is_none() {
                    return None;
                }
                if let Some(name) = &new_name {
                    debug!("renaming declaration '{}' to '{}'", decl.name, name);
                    self.renamed += 1;
                }
                let name = new_name.unwrap_or(decl.name);
                let members = new_members.unwrap_or(decl.members);
                Some(arena.declaration(name, members))
            }
            Node::Member(member) => self
                .rewrite_children(arena, &member.children)
                .map(|children| arena.member(children)),
            Node::Statement(stmt) => self
                .rewrite_children(arena, &stmt.children)
                .map(|children| arena.statement(children)),
            Node::Expression(_) => None,
        }
    }

    /// Rewrite a child list, returning an updated copy only if at least
    /// one child changed. Unchanged siblings keep their original ids.
    fn rewrite_children(
        &mut self,
        arena: &mut SyntaxArena,
        children: &[NodeId],
    ) -> Option<Vec<NodeId>> {
        let mut updated: Option<Vec<NodeId>> = None;
        for (index, &child) in children.iter().enumerate() {
            if let Some(new_child) = self.rewrite_node(arena, child) {
                updated.get_or_insert_with(|| children.to_vec())[index] = new_child;
            }
        }
        updated
    }
}
