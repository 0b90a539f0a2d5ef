//! Fresh names for synthetic variables.
//!
//! One [`Allocator`] serves one scope: a method, constructor, accessor or expression-bodied member,
//! whose locals all share one flat namespace. It never hands out a name that is bound anywhere in
//! the scope or that it handed out before.


use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::{SyntaxElement, SyntaxKind as SK, SyntaxNode};
use rustc_hash::FxHashSet;

/// Hands out collision-free names.
#[derive(Debug, Default, Clone)]
pub struct Allocator {
  used: FxHashSet<String>,
}

impl Allocator {
  /// Returns an allocator that will avoid every name in `seed`.
  pub fn new<I, S>(seed: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self { used: seed.into_iter().map(Into::into).collect() }
  }

  /// Returns an allocator seeded with every name bound in the scope rooted at `scope`.
  #[must_use]
  pub fn for_scope(scope: &SyntaxNode) -> Self {
    Self::new(bound_names(scope))
  }

  /// Whether `name` is bound or was handed out.
  #[must_use]
  pub fn is_used(&self, name: &str) -> bool {
    self.used.contains(name)
  }

  /// Returns `prefix` if unused, else `prefix` followed by the smallest number from 2 that makes it
  /// unused. The returned name is reserved.
  pub fn generate(&mut self, prefix: &str) -> String {
    if self.used.insert(prefix.to_owned()) {
      return prefix.to_owned();
    }
    let mut n = 2usize;
    loop {
      let name = format!("{prefix}{n}");
      if self.used.insert(name.clone()) {
        return name;
      }
      n += 1;
    }
  }
}

/// Returns every name bound in the scope rooted at `scope`, in source order: parameters, the
/// implicit `value` of setters, local declarators, `out` variables, loop and catch variables,
/// lambda and local function parameters, local function names, and pattern designations.
#[must_use]
pub fn bound_names(scope: &SyntaxNode) -> Vec<String> {
  let mut ret = Vec::new();
  if let Some(decl) = ast::ScopeDecl::cast(scope.clone()) {
    ret.extend(decl.params().iter().filter_map(ast::Param::name).map(|t| t.text().to_owned()));
    if decl.binds_value() {
      ret.push("value".to_owned());
    }
  }
  for node in scope.descendants() {
    let tok = match node.kind() {
      SK::Param => ast::Param::cast(node).and_then(|x| x.name()),
      SK::VarDeclarator => ast::VarDeclarator::cast(node).and_then(|x| x.name()),
      SK::DeclExpr => ast::DeclExpr::cast(node).and_then(|x| x.name()),
      SK::ForeachStmt => ast::ForeachStmt::cast(node).and_then(|x| x.name()),
      SK::CatchDecl => ast::CatchDecl::cast(node).and_then(|x| x.name()),
      SK::LocalFuncStmt => ast::LocalFuncStmt::cast(node).and_then(|x| x.name()),
      SK::ExprIs => ast::ExprIs::cast(node).and_then(|x| x.designation()),
      SK::CaseLabel => node
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|t| t.kind() == SK::Id),
      _ => None,
    };
    if let Some(tok) = tok {
      let name = tok.text().trim_start_matches('@');
      if !ret.iter().any(|x| x == name) {
        ret.push(name.to_owned());
      }
    }
  }
  ret
}
