//! Single-pass driver over either design representation
//!
//! The driver owns dispatch only: netlists are renamed in place, trees
//! are rewritten clone-on-write and the root re-pointed. It keeps no
//! state between invocations.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::netlist::{MalformedDesignError, Netlist};
use crate::rename::{Collision, NetlistRenamer, RenameReport};
use crate::rewrite::TreeRewriter;
use crate::rules::RuleSet;
use crate::syntax::SyntaxTree;

/// A design in either representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Design {
    /// Structural module/cell graph, renamed in place
    Netlist(Netlist),
    /// Immutable syntax tree, rewritten clone-on-write
    Tree(SyntaxTree),
}

/// Fatal failure of a rename pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("malformed design: {0}")]
    Malformed(#[from] MalformedDesignError),
    /// Only raised in strict mode; otherwise collisions are skipped and
    /// reported in the pass result
    #[error("{0}")]
    Collision(#[from] Collision),
}

/// Applies one rename pass to a design
#[derive(Debug, Clone, Default)]
pub struct Driver {
    strict: bool,
}

impl Driver {
    /// Create a driver with the default recovery policy: collisions are
    /// skipped and reported, never fatal
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Escalate the first collision to a hard failure
    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }

    /// Apply `rules` to every addressable name in `design`.
    ///
    /// The netlist representation is mutated in place. For the tree
    /// representation the arena grows and `root` is re-pointed; nodes of
    /// the previous version stay valid, and an unchanged tree keeps its
    /// root identity.
    pub fn run(&self, design: &mut Design, rules: &RuleSet) -> Result<RenameReport, PassError> {
        info!("executing rename pass (prefix '{}')", rules.prefix);
        let report = match design {
            Design::Netlist(netlist) => NetlistRenamer::new(rules).rename(netlist)?,
            Design::Tree(tree) => {
                let mut rewriter = TreeRewriter::new(rules);
                let new_root = rewriter.rewrite(&mut tree.arena, tree.root);
                let changed = new_root != tree.root;
                tree.root = new_root;
                RenameReport {
                    changed,
                    renamed: rewriter.renamed(),
                    collisions: Vec::new(),
                }
            }
        };
        if self.strict {
            if let Some(collision) = report.collisions.first() {
                return Err(PassError::Collision(collision.clone()));
            }
        }
        info!(
            "rename pass done: {} renamed, {} collisions",
            report.renamed,
            report.collisions.len()
        );
        Ok(report)
    }
}
