//! replate-ir - hierarchical entity renaming for hardware designs
//!
//! This crate handles:
//! - Design representations: a structural netlist (modules owning cells)
//!   and an arena-backed immutable syntax tree
//! - Rename rules: prefix, exact-match ignore set, one-off substitutions
//! - The rename pass over both representations: in-place with name-index
//!   reinsertion for netlists, clone-on-write for trees

pub mod driver;
pub mod netlist;
pub mod rename;
pub mod rewrite;
pub mod rules;
pub mod syntax;

// Re-export main types
pub use driver::{Design, Driver, PassError};
pub use netlist::{Cell, MalformedDesignError, Module, Netlist};
pub use rename::{Collision, NetlistRenamer, RenameReport};
pub use rewrite::TreeRewriter;
pub use rules::RuleSet;
pub use syntax::{Declaration, Expression, Member, Node, NodeId, Statement, SyntaxArena, SyntaxTree};

/// Apply a rename rule to a design in either representation
pub fn apply_rename(design: &mut Design, rules: &RuleSet) -> Result<RenameReport, PassError> {
    Driver::new().run(design, rules)
}
