//! Per-scope state: fresh names and the layout new blocks should follow.

use csharp_fresh::Allocator;
use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::{SyntaxKind as SK, SyntaxNode};

#[derive(Debug)]
pub(crate) struct Scope {
  pub(crate) names: Allocator,
  pub(crate) step: String,
  /// Whether `{` goes on its own line.
  pub(crate) allman: bool,
}

impl Scope {
  pub(crate) fn new(owner: &SyntaxNode) -> Self {
    log::debug!("new scope at {:?}", owner.text_range());
    let root = owner.ancestors().last().unwrap_or_else(|| owner.clone());
    let has_block = |n: &SyntaxNode| n.descendants().any(|d| d.kind() == SK::Block);
    // scopes with only an expression body get the layout of the document.
    let layout = if has_block(owner) { owner } else { &root };
    Self {
      names: Allocator::for_scope(owner),
      step: csharp_trivia::indentation_step(layout),
      allman: allman(layout),
    }
  }
}

/// Returns the node whose locals share a namespace with `node`. Statements outside any member
/// belong to the root.
pub(crate) fn owner(node: &SyntaxNode) -> SyntaxNode {
  match ast::ScopeDecl::containing(node) {
    Some(decl) => decl.syntax().clone(),
    None => node.ancestors().last().unwrap_or_else(|| node.clone()),
  }
}

/// Returns the child indices leading from the root to `node`.
pub(crate) fn path(node: &SyntaxNode) -> Vec<usize> {
  let mut ret: Vec<_> = node.ancestors().take_while(|n| n.parent().is_some()).map(|n| n.index()).collect();
  ret.reverse();
  ret
}

fn allman(node: &SyntaxNode) -> bool {
  node
    .descendants()
    .filter(|n| n.kind() == SK::Block)
    .find(|n| n.parent().is_some_and(|p| p.kind() != SK::StmtList && p.kind() != SK::Block))
    .is_none_or(|block| csharp_trivia::starts_line(&block))
}
