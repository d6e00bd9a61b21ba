//! Tests for clone-on-write tree rewriting

use replate_ir::rewrite::TreeRewriter;
use replate_ir::rules::RuleSet;
use replate_ir::syntax::{Node, NodeId, SyntaxArena};

/// Source-shaped fixture: module `m` holds a nested declaration `n` and
/// some statements; module `top` instantiates `m` as `fooBar`.
struct Fixture {
    arena: SyntaxArena,
    root: NodeId,
    m: NodeId,
    n: NodeId,
    top: NodeId,
}

fn create_source_tree() -> Fixture {
    let mut arena = SyntaxArena::new();

    let n = arena.declaration("n", vec![]);
    let tmp = arena.expression("reg tmp;");
    let inst = arena.expression("n n ();");
    let cond = arena.statement(vec![]);
    let m = arena.declaration("m", vec![n, tmp, inst, cond]);

    let clk = arena.expression("input clk");
    let foo_bar = arena.expression("m fooBar ();");
    let case_arm = arena.expression("a <= 1;");
    let always = arena.statement(vec![case_arm]);
    let top = arena.declaration("top", vec![clk, foo_bar, always]);

    let root = arena.statement(vec![m, top]);
    Fixture {
        arena,
        root,
        m,
        n,
        top,
    }
}

fn declaration_of(arena: &SyntaxArena, id: NodeId) -> (&str, &[NodeId]) {
    match &arena[id] {
        Node::Declaration(decl) => (decl.name.as_str(), decl.members.as_slice()),
        other => panic!("expected declaration, got {other:?}"),
    }
}

fn children_of(arena: &SyntaxArena, id: NodeId) -> &[NodeId] {
    match &arena[id] {
        Node::Statement(stmt) => stmt.children.as_slice(),
        other => panic!("expected statement, got {other:?}"),
    }
}

#[test]
fn test_no_match_returns_original_root_without_allocating() {
    let mut fixture = create_source_tree();
    let nodes_before = fixture.arena.len();
    let rules = RuleSet::default();

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut fixture.arena, fixture.root);

    assert_eq!(new_root, fixture.root);
    assert_eq!(fixture.arena.len(), nodes_before);
    assert_eq!(rewriter.renamed(), 0);
}

#[test]
fn test_substitution_clones_path_and_shares_siblings() {
    let mut fixture = create_source_tree();
    let nodes_before = fixture.arena.len();
    let (_, m_members_before) = declaration_of(&fixture.arena, fixture.m);
    let m_members_before = m_members_before.to_vec();

    let mut rules = RuleSet::default();
    rules.add_substitution("m", "FooBar");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut fixture.arena, fixture.root);

    assert_ne!(new_root, fixture.root);
    assert_eq!(rewriter.renamed(), 1);
    // Exactly the changed declaration and its ancestor chain are new
    // slots: one for `m`, one for the root.
    assert_eq!(fixture.arena.len(), nodes_before + 2);

    let children = children_of(&fixture.arena, new_root);
    let (new_m_name, new_m_members) = declaration_of(&fixture.arena, children[0]);
    assert_eq!(new_m_name, "FooBar");
    // The renamed clone shares every member with the original, so the
    // nested declaration `n` and the statement texts are untouched.
    assert_eq!(new_m_members, m_members_before.as_slice());
    assert_eq!(new_m_members[0], fixture.n);

    // The sibling subtree `top` (with its `m fooBar ();` text) is shared
    // wholesale, never cloned.
    assert_eq!(children[1], fixture.top);
}

#[test]
fn test_nested_rename_clones_every_strict_ancestor() {
    let mut fixture = create_source_tree();
    let (_, m_members_before) = declaration_of(&fixture.arena, fixture.m);
    let m_members_before = m_members_before.to_vec();

    let mut rules = RuleSet::default();
    rules.add_substitution("n", "N");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut fixture.arena, fixture.root);

    assert_ne!(new_root, fixture.root);
    let children = children_of(&fixture.arena, new_root);

    // `m` did not change its own name but sits on the changed path, so it
    // is a new node referencing the renamed child.
    let new_m = children[0];
    assert_ne!(new_m, fixture.m);
    let (new_m_name, new_m_members) = declaration_of(&fixture.arena, new_m);
    assert_eq!(new_m_name, "m");
    assert_ne!(new_m_members[0], fixture.n);
    let (new_n_name, _) = declaration_of(&fixture.arena, new_m_members[0]);
    assert_eq!(new_n_name, "N");

    // Siblings of the changed path keep their identity.
    assert_eq!(&new_m_members[1..], &m_members_before[1..]);
    assert_eq!(children[1], fixture.top);
}

#[test]
fn test_prefix_renames_all_declarations() {
    let mut fixture = create_source_tree();
    let rules = RuleSet::with_prefix("pfx_");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut fixture.arena, fixture.root);

    assert_eq!(rewriter.renamed(), 3);
    let children = children_of(&fixture.arena, new_root);
    let (m_name, m_members) = declaration_of(&fixture.arena, children[0]);
    assert_eq!(m_name, "pfx_m");
    let (n_name, _) = declaration_of(&fixture.arena, m_members[0]);
    assert_eq!(n_name, "pfx_n");
    let (top_name, _) = declaration_of(&fixture.arena, children[1]);
    assert_eq!(top_name, "pfx_top");
}

#[test]
fn test_shadowed_declarations_are_renamed_independently() {
    let mut arena = SyntaxArena::new();
    let inner = arena.declaration("m", vec![]);
    let outer = arena.declaration("m", vec![inner]);
    let rules = RuleSet::with_prefix("pfx_");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut arena, outer);

    assert_eq!(rewriter.renamed(), 2);
    let (outer_name, outer_members) = declaration_of(&arena, new_root);
    assert_eq!(outer_name, "pfx_m");
    let (inner_name, _) = declaration_of(&arena, outer_members[0]);
    assert_eq!(inner_name, "pfx_m");
}

#[test]
fn test_ignored_declaration_keeps_subtree_identity() {
    let mut arena = SyntaxArena::new();
    let body = arena.expression("wire w;");
    let a = arena.declaration("a", vec![body]);
    let b = arena.declaration("b", vec![]);
    let root = arena.statement(vec![a, b]);

    let mut rules = RuleSet::with_prefix("pfx_");
    rules.add_ignore("a");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut arena, root);

    let children = children_of(&arena, new_root);
    assert_eq!(children[0], a);
    assert_ne!(children[1], b);
    let (b_name, _) = declaration_of(&arena, children[1]);
    assert_eq!(b_name, "pfx_b");
}

#[test]
fn test_original_tree_survives_the_rewrite() {
    let mut fixture = create_source_tree();
    let mut rules = RuleSet::default();
    rules.add_substitution("m", "FooBar");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut fixture.arena, fixture.root);
    assert_ne!(new_root, fixture.root);

    // Every id of the previous version is still valid and unchanged.
    let (old_m_name, _) = declaration_of(&fixture.arena, fixture.m);
    assert_eq!(old_m_name, "m");
    let old_children = children_of(&fixture.arena, fixture.root);
    assert_eq!(old_children, &[fixture.m, fixture.top]);
}

#[test]
fn test_self_substitution_is_identity_preserving() {
    let mut fixture = create_source_tree();
    let mut rules = RuleSet::default();
    rules.add_substitution("m", "m");

    let mut rewriter = TreeRewriter::new(&rules);
    let new_root = rewriter.rewrite(&mut fixture.arena, fixture.root);

    assert_eq!(new_root, fixture.root);
    assert_eq!(rewriter.renamed(), 0);
}

#[test]
fn test_second_disjoint_rule_is_a_no_op() {
    let mut fixture = create_source_tree();
    let rules = RuleSet::with_prefix("pfx_");
    let mut rewriter = TreeRewriter::new(&rules);
    let renamed_root = rewriter.rewrite(&mut fixture.arena, fixture.root);

    let mut second = RuleSet::with_prefix("other_");
    for name in ["pfx_m", "pfx_n", "pfx_top"] {
        second.add_ignore(name);
    }
    let mut rewriter = TreeRewriter::new(&second);
    let final_root = rewriter.rewrite(&mut fixture.arena, renamed_root);

    assert_eq!(final_root, renamed_root);
}
