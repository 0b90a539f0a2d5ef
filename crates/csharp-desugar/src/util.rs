use crate::error::{Error, Kind, Unsupported};
use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::{SyntaxKind as SK, SyntaxNode, SyntaxToken};
use text_size::TextRange;

pub(crate) fn unsupported(node: &SyntaxNode, what: Unsupported) -> Error {
  Error { range: node.text_range(), kind: Kind::Unsupported(what, snippet(node)) }
}

pub(crate) fn inconsistent(node: &SyntaxNode, what: &'static str) -> Error {
  Error { range: node.text_range(), kind: Kind::Inconsistent(what) }
}

pub(crate) fn missing_type(node: &SyntaxNode, expr: &str) -> Error {
  Error { range: node.text_range(), kind: Kind::MissingType(csharp_ty::normalize(expr)) }
}

/// The first line of the node's text.
fn snippet(node: &SyntaxNode) -> String {
  let text = node.text().to_string();
  match text.split_once('\n') {
    Some((first, _)) => format!("{} ...", first.trim_end()),
    None => text,
  }
}

/// Returns the outermost parenthesized expression that is just `node` in parentheses.
pub(crate) fn unparen(node: &SyntaxNode) -> SyntaxNode {
  let mut cur = node.clone();
  while let Some(p) = cur.parent().filter(|p| p.kind() == SK::ExprParen) {
    cur = p;
  }
  cur
}

/// Whether evaluating the node can have no observable effect, save for calling property getters
/// and indexers.
pub(crate) fn is_pure(node: &SyntaxNode) -> bool {
  match node.kind() {
    SK::ExprName
    | SK::ExprLit
    | SK::ExprThis
    | SK::ExprBase
    | SK::ExprDefault
    | SK::ExprTypeof
    | SK::ExprLambda
    | SK::TypeRef
    | SK::TypeArgList => true,
    SK::ExprUnary => {
      let op = ast::ExprUnary::cast(node.clone()).and_then(|x| x.op());
      let effect = op.is_some_and(|t| matches!(t.kind(), SK::PlusPlus | SK::MinusMinus) || t.text() == "await");
      !effect && node.children().all(|c| is_pure(&c))
    }
    SK::ExprParen
    | SK::ExprMember
    | SK::ExprIndex
    | SK::ExprCast
    | SK::ExprBinary
    | SK::ExprConditional
    | SK::ExprIs
    | SK::ExprAs
    | SK::Arg
    | SK::ArgList
    | SK::BracketArgList
    | SK::ObjectInit
    | SK::CollectionInit
    | SK::InitMember
    | SK::InitIndexer
    | SK::InitElement => node.children().all(|c| is_pure(&c)),
    _ => false,
  }
}

/// Whether the expression `name` is read anywhere in `node`.
pub(crate) fn reads(node: &SyntaxNode, name: &str) -> bool {
  let name = name.trim_start_matches('@');
  node.descendants().any(|n| match n.kind() {
    SK::ExprName => {
      ast::ExprName::cast(n).and_then(|x| x.name()).is_some_and(|t| t.text().trim_start_matches('@') == name)
    }
    SK::ExprThis => name == "this",
    _ => false,
  })
}

/// Returns the name a pure target is rooted at: `x` for `x.y[i]`, `this` for `this.z`.
pub(crate) fn root_name(node: &SyntaxNode) -> Option<String> {
  match node.kind() {
    SK::ExprName => Some(ast::ExprName::cast(node.clone())?.name()?.text().to_owned()),
    SK::ExprThis => Some("this".to_owned()),
    SK::ExprMember | SK::ExprIndex | SK::ExprParen => root_name(&node.first_child()?),
    _ => None,
  }
}

/// Whether `name`, read at `node`, is a parameter of the enclosing member or a local declared
/// before `node` in a statement around it. Reading such a name has no effect, unlike a property
/// that happens to share the name of some other binding in the member.
pub(crate) fn is_local(node: &SyntaxNode, name: &str) -> bool {
  let name = name.trim_start_matches('@');
  let is = |tok: Option<SyntaxToken>| tok.is_some_and(|t| t.text().trim_start_matches('@') == name);
  let mut cur = node.clone();
  while let Some(parent) = cur.parent() {
    let found = match parent.kind() {
      SK::Block | SK::StmtList | SK::SwitchSection => parent
        .children()
        .take_while(|c| c != &cur)
        .filter_map(ast::LocalDeclStmt::cast)
        .any(|d| d.declarators().any(|x| is(x.name()))),
      SK::ForStmt => parent
        .children()
        .filter(|c| c.kind() == SK::ForInit && c != &cur)
        .flat_map(|c| c.children().filter_map(ast::VarDeclarator::cast))
        .any(|x| is(x.name())),
      SK::ForeachStmt => {
        let stmt = ast::ForeachStmt::cast(parent.clone());
        stmt.as_ref().and_then(ast::ForeachStmt::body).is_some_and(|b| b.syntax() == &cur)
          && is(stmt.and_then(|x| x.name()))
      }
      SK::CatchClause => {
        cur.kind() == SK::Block && parent.children().filter_map(ast::CatchDecl::cast).any(|d| is(d.name()))
      }
      SK::LocalFuncStmt => ast::LocalFuncStmt::cast(parent.clone())
        .and_then(|x| x.param_list())
        .is_some_and(|l| l.params().any(|x| is(x.name()))),
      _ => false,
    };
    if found {
      return true;
    }
    if let Some(decl) = ast::ScopeDecl::cast(parent.clone()) {
      return decl.params().iter().any(|x| is(x.name())) || (decl.binds_value() && name == "value");
    }
    cur = parent;
  }
  false
}

/// Returns the nearest statement containing `node`.
pub(crate) fn host_stmt(node: &SyntaxNode) -> Option<SyntaxNode> {
  node.ancestors().skip(1).find(|n| ast::Stmt::can_cast(n.kind()))
}

/// Whether statements can be generated before `stmt` to compute a part of it.
pub(crate) fn can_hoist_out_of(stmt: &SyntaxNode) -> bool {
  matches!(
    stmt.kind(),
    SK::ExprStmt | SK::LocalDeclStmt | SK::ReturnStmt | SK::ThrowStmt | SK::YieldStmt | SK::IfStmt
  )
}

/// Checks that `node`, part of `stmt`, can be computed before the rest of `stmt` runs: it is always
/// evaluated, and nothing evaluated before it has side effects.
pub(crate) fn check_hoist(node: &SyntaxNode, stmt: &SyntaxNode) -> Result<(), Error> {
  if let Some(ld) = ast::LocalDeclStmt::cast(stmt.clone()) {
    if ld.declarators().count() > 1 {
      return Err(unsupported(stmt, Unsupported::ManyDeclarators));
    }
  }
  let mut cur = node.clone();
  while let Some(parent) = cur.parent() {
    if &parent == stmt {
      break;
    }
    let first = parent.first_child().as_ref() == Some(&cur);
    let conditional = match parent.kind() {
      SK::ExprLambda | SK::LocalFuncStmt => return Err(unsupported(node, Unsupported::Lambda)),
      SK::ExprConditional | SK::ExprCondMember | SK::ExprCondIndex => !first,
      SK::ExprBinary => {
        let op = ast::ExprBinary::cast(parent.clone()).and_then(|x| x.op());
        !first && op.is_some_and(|t| matches!(t.kind(), SK::AmpAmp | SK::BarBar | SK::QuestionQuestion))
      }
      _ => false,
    };
    if conditional {
      return Err(unsupported(node, Unsupported::Conditional));
    }
    if parent.children().take_while(|c| c != &cur).any(|c| !is_pure(&c)) {
      return Err(unsupported(node, Unsupported::NonPureBefore));
    }
    cur = parent;
  }
  Ok(())
}

/// Returns the text of `host` with `range` replaced by `with`.
pub(crate) fn substitute(host: &SyntaxNode, range: TextRange, with: &str) -> String {
  let text = host.text().to_string();
  let start = usize::from(host.text_range().start());
  let lo = usize::from(range.start()) - start;
  let hi = usize::from(range.end()) - start;
  format!("{}{with}{}", &text[..lo], &text[hi..])
}

/// Returns the name of the parameter an argument binds to, by name if the argument is named.
pub(crate) fn param_name(resolver: &dyn csharp_ty::Resolver, arg: &ast::Arg) -> Option<String> {
  if let Some(name) = arg.arg_name() {
    return Some(name.text().trim_start_matches('@').to_owned());
  }
  let list = arg.syntax().parent()?;
  let position = list.children().take_while(|c| c != arg.syntax()).filter(|c| c.kind() == SK::Arg).count();
  let owner = list.parent()?;
  let callee = match owner.kind() {
    SK::ExprCall => ast::ExprCall::cast(owner)?.callee()?.syntax().text().to_string(),
    SK::ExprNew => ast::ExprNew::cast(owner)?.ty()?.syntax().text().to_string(),
    SK::ExprIndex | SK::ExprCondIndex => owner.first_child()?.text().to_string(),
    _ => return None,
  };
  let ret = resolver.matched_parameter_name(&callee, position)?;
  Some(ret.trim_start_matches('@').to_owned())
}

/// Returns the return type written on the member `node` returns from, if it is not a lambda or
/// local function and is not `async`.
pub(crate) fn declared_return_type(node: &SyntaxNode) -> Option<String> {
  let is_async = |n: &SyntaxNode| {
    n.children_with_tokens().filter_map(rowan::NodeOrToken::into_token).any(|t| t.text() == "async")
  };
  let ty = node.ancestors().find_map(|n| match n.kind() {
    SK::ExprLambda | SK::LocalFuncStmt => Some(None),
    SK::MethodDecl if is_async(&n) => Some(None),
    SK::MethodDecl => Some(ast::MethodDecl::cast(n)?.ret_ty()),
    SK::Accessor => {
      let acc = ast::Accessor::cast(n.clone())?;
      if acc.keyword().is_none_or(|k| k.text() != "get") {
        return Some(None);
      }
      let decl = n.ancestors().find(|a| matches!(a.kind(), SK::PropertyDecl | SK::IndexerDecl))?;
      Some(ast::support::child::<ast::TypeRef>(&decl))
    }
    SK::PropertyDecl | SK::IndexerDecl => Some(ast::support::child::<ast::TypeRef>(&n)),
    _ => None,
  })??;
  let text = ty.syntax().text().to_string();
  (text != "void").then_some(text)
}

/// Whether a type displays as a nullable value type.
pub(crate) fn is_nullable_value(ty: &str) -> bool {
  ty.ends_with('?') || ty.starts_with("Nullable<") || ty.starts_with("System.Nullable<")
}
