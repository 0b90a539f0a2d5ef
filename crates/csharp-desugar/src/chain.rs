//! Rewriting conditional access into explicit null checks.
//!
//! A chain is the longest run of member accesses, element accesses, calls and `!` that contains a
//! `?.` or `?[`. It is split at each conditional operator: the receiver below the first one, then
//! one part per operator, each part written without its `?`. So `a?.B()?[i].C` has receiver `a` and
//! parts `.B()`, `[i].C`.
//!
//! Each part but the last is stored in a fresh variable and checked against null before the next
//! part runs. The last part is the payload, and where its value goes depends on where the chain is.

use crate::cx::Cx;
use crate::emit::Stmt;
use crate::error::{Error, Unsupported};
use crate::splice;
use crate::st::St;
use crate::util;
use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::{SyntaxKind as SK, SyntaxNode};
use csharp_ty::TypeName;

pub(crate) fn get(st: &mut St, cx: Cx<'_>, mut root: SyntaxNode) -> Result<SyntaxNode, Error> {
  while let Some(top) = next(&root) {
    log::debug!("chain at {:?}: {top}", top.text_range());
    root = rewrite(st, cx, &top)?;
    st.rewrote();
  }
  Ok(root)
}

/// Returns the first chain in document order. Since parents come before children, the outermost
/// chain is rewritten first, and chains inside it are found again in the new tree.
fn next(root: &SyntaxNode) -> Option<SyntaxNode> {
  let first = root.descendants().find(|n| is_conditional(n.kind()))?;
  let mut cur = first;
  while let Some(p) = cur.parent() {
    if !is_spine(&p) || p.first_child().as_ref() != Some(&cur) {
      break;
    }
    cur = p;
  }
  Some(cur)
}

fn is_conditional(kind: SK) -> bool {
  matches!(kind, SK::ExprCondMember | SK::ExprCondIndex)
}

fn is_spine(node: &SyntaxNode) -> bool {
  match node.kind() {
    SK::ExprMember | SK::ExprCondMember | SK::ExprIndex | SK::ExprCondIndex | SK::ExprCall => true,
    SK::ExprPostfix => ast::first_token(node).is_some_and(|t| t.kind() == SK::Bang),
    _ => false,
  }
}

#[derive(Debug)]
struct Chain {
  receiver: SyntaxNode,
  receiver_text: String,
  parts: Vec<String>,
}

impl Chain {
  fn new(top: &SyntaxNode) -> Result<Self, Error> {
    let mut marks = Vec::new();
    let mut receiver = None;
    let mut cur = top.clone();
    while is_spine(&cur) {
      let mark = match cur.kind() {
        SK::ExprCondMember => ast::ExprCondMember::cast(cur.clone()).and_then(|x| x.question_dot()),
        SK::ExprCondIndex => {
          ast::ExprCondIndex::cast(cur.clone()).and_then(|x| x.args()).and_then(|x| x.syntax().first_token())
        }
        _ => None,
      };
      let next = cur.first_child().ok_or_else(|| util::inconsistent(&cur, "access without a receiver"))?;
      if let Some(mark) = mark {
        marks.push(mark.text_range().start());
        receiver = Some(next.clone());
      }
      cur = next;
    }
    let receiver = receiver.ok_or_else(|| util::inconsistent(top, "chain without `?.` or `?[`"))?;
    marks.reverse();
    let text = top.text().to_string();
    let start = top.text_range().start();
    let offset = |m: text_size::TextSize| usize::from(m - start);
    let receiver_text = text[..offset(marks[0])].trim_end().to_owned();
    let parts = marks
      .iter()
      .enumerate()
      .map(|(idx, &m)| {
        // skip the `?`
        let lo = offset(m) + 1;
        let hi = marks.get(idx + 1).map_or(text.len(), |&m| offset(m));
        text[lo..hi].trim_end().to_owned()
      })
      .collect();
    Ok(Self { receiver, receiver_text, parts })
  }

  /// The text of the receiver followed by the first `n` parts, all unconditional.
  fn prefix(&self, n: usize) -> String {
    let mut ret = self.receiver_text.clone();
    for part in &self.parts[..n] {
      ret.push_str(part);
    }
    ret
  }
}

/// Where the payload goes.
enum Dest {
  Discard,
  /// A variable already holding the default value.
  Var(String),
}

/// What replaces the statement containing the chain, besides the null checks.
struct Plan {
  host: SyntaxNode,
  before: Vec<Stmt>,
  dest: Dest,
  /// The type of the destination variable, if known.
  ty: Option<TypeName>,
  after: Vec<Stmt>,
}

fn rewrite(st: &mut St, cx: Cx<'_>, top: &SyntaxNode) -> Result<SyntaxNode, Error> {
  let chain = Chain::new(top)?;
  let mut whole = util::unparen(top);
  let mut fallback = None::<SyntaxNode>;
  if let Some(bin) = whole.parent().and_then(ast::ExprBinary::cast) {
    if bin.op().is_some_and(|t| t.kind() == SK::QuestionQuestion) {
      let lhs = bin.lhs().ok_or_else(|| util::inconsistent(bin.syntax(), "`??` without a left side"))?;
      if lhs.syntax() != &whole {
        return Err(util::unsupported(top, Unsupported::ChainInFallback));
      }
      let rhs = bin.rhs().ok_or_else(|| util::inconsistent(bin.syntax(), "`??` without a right side"))?;
      if rhs.syntax().descendants().any(|n| is_conditional(n.kind())) {
        return Err(util::unsupported(bin.syntax(), Unsupported::FallbackWithChain));
      }
      fallback = Some(rhs.syntax().clone());
      whole = util::unparen(bin.syntax());
    }
  }
  let Plan { host, before: mut stmts, dest, ty, after } = plan(st, cx, top, &whole, fallback.is_some())?;
  let (dest, tail) = match (fallback, dest) {
    (Some(fallback), Dest::Var(v)) => with_fallback(st, cx, top, &mut stmts, &fallback, v, ty.as_ref())?,
    (_, dest) => (dest, Vec::new()),
  };
  stmts.extend(null_checks(st, cx, &chain, top, &dest)?);
  stmts.extend(tail);
  stmts.extend(after);
  splice::replace_stmt(st, &host, stmts)
}

/// Returns where the chain should go so that `v` ends up with the fallback applied, and the
/// statements that apply it after the null checks.
///
/// If the chain is a nullable value but `v` is not, `v` cannot hold the null the chain
/// short-circuits to, so the chain goes through a nullable temporary first.
fn with_fallback(
  st: &mut St,
  cx: Cx<'_>,
  top: &SyntaxNode,
  stmts: &mut Vec<Stmt>,
  fallback: &SyntaxNode,
  v: String,
  var_ty: Option<&TypeName>,
) -> Result<(Dest, Vec<Stmt>), Error> {
  let text = top.text().to_string();
  let chain_ty = cx.resolver.static_type_of(&text).ok_or_else(|| util::missing_type(top, &text))?;
  let same = var_ty.is_some_and(|t| csharp_ty::normalize(t.as_str()) == csharp_ty::normalize(chain_ty.as_str()));
  if util::is_nullable_value(chain_ty.as_str()) && !same {
    let tmp = st.scope(top).names.generate("condExpression");
    stmts.push(Stmt::Line(format!("{} {tmp} = {};", cx.display(&chain_ty), cx.default_of(&chain_ty))));
    let tail = vec![Stmt::Verbatim(format!("{v} = {tmp} ?? {fallback};"))];
    return Ok((Dest::Var(tmp), tail));
  }
  let body = vec![Stmt::Verbatim(format!("{v} = {fallback};"))];
  let tail = vec![Stmt::If { cond: format!("{v} == null"), body }];
  Ok((Dest::Var(v), tail))
}

/// Decides where the payload goes from the position of `whole`, the chain with any fallback and
/// parentheses.
#[allow(clippy::too_many_lines)]
fn plan(
  st: &mut St,
  cx: Cx<'_>,
  top: &SyntaxNode,
  whole: &SyntaxNode,
  has_fallback: bool,
) -> Result<Plan, Error> {
  let parent = whole.parent().ok_or_else(|| util::unsupported(top, Unsupported::ChainPosition))?;
  match parent.kind() {
    SK::ExprStmt => {
      if has_fallback {
        return Err(util::unsupported(whole, Unsupported::BareFallback));
      }
      Ok(Plan { host: parent, before: Vec::new(), dest: Dest::Discard, ty: None, after: Vec::new() })
    }
    SK::VarDeclarator => {
      let decl = parent.parent().and_then(ast::LocalDeclStmt::cast);
      let decl = decl.ok_or_else(|| util::unsupported(top, Unsupported::ChainPosition))?;
      if decl.is_using() || decl.is_const() {
        return Err(util::unsupported(decl.syntax(), Unsupported::UsingOrConst));
      }
      if decl.declarators().count() > 1 {
        return Err(util::unsupported(decl.syntax(), Unsupported::ManyDeclarators));
      }
      let name = ast::VarDeclarator::cast(parent.clone()).and_then(|x| x.name());
      let name = name.ok_or_else(|| util::inconsistent(&parent, "declarator without a name"))?;
      let written = decl.ty().map(|t| t.syntax().text().to_string());
      let (ty, shown, default) = match written {
        Some(written) if written != "var" => {
          let ty = TypeName::new(written.as_str());
          let default = cx.resolver.default_value_literal(&ty);
          (ty, written, default)
        }
        _ => {
          let ty = result_type(cx, top, whole)?;
          let (shown, default) = (cx.display(&ty), cx.default_of(&ty));
          (ty, shown, default)
        }
      };
      let before = vec![Stmt::Line(format!("{shown} {name} = {default};"))];
      let host = decl.syntax().clone();
      Ok(Plan { host, before, dest: Dest::Var(name.text().to_owned()), ty: Some(ty), after: Vec::new() })
    }
    SK::ExprAssign => {
      let assign = ast::ExprAssign::cast(parent.clone());
      let assign = assign.ok_or_else(|| util::inconsistent(&parent, "not an assignment"))?;
      let host = parent.parent().filter(|p| p.kind() == SK::ExprStmt);
      let target = assign.lhs().map(|x| x.syntax().clone());
      let (Some(host), Some(target)) = (host, target) else {
        return Err(util::unsupported(top, Unsupported::ChainPosition));
      };
      if &target == whole {
        return Err(util::unsupported(top, Unsupported::ChainPosition));
      }
      if assign.op().is_none_or(|t| t.kind() != SK::Eq) {
        return Err(util::unsupported(&parent, Unsupported::CompoundAssign));
      }
      if !util::is_pure(&target) {
        return Err(util::unsupported(&target, Unsupported::ImpureTarget));
      }
      let ty = result_type(cx, top, whole)?;
      let default = cx.default_of(&ty);
      let target_text = target.text().to_string();
      let local = ast::ExprName::cast(target.clone())
        .and_then(|x| x.name())
        .is_some_and(|t| util::is_local(top, t.text()));
      if local && !util::reads(whole, &target_text) {
        let before = vec![Stmt::Line(format!("{target_text} = {default};"))];
        return Ok(Plan { host, before, dest: Dest::Var(target_text), ty: Some(ty), after: Vec::new() });
      }
      let v = st.scope(top).names.generate("assignValue");
      let before = vec![Stmt::Line(format!("{} {v} = {default};", cx.display(&ty)))];
      let after = vec![Stmt::Line(format!("{target_text} = {v};"))];
      Ok(Plan { host, before, dest: Dest::Var(v), ty: Some(ty), after })
    }
    SK::ReturnStmt => {
      let ty = match result_type(cx, top, whole) {
        Ok(ty) => cx.display(&ty),
        Err(e) => util::declared_return_type(&parent).ok_or(e)?,
      };
      let ty_name = TypeName::new(ty.as_str());
      let default = cx.default_of(&ty_name);
      let v = st.scope(top).names.generate("returnExpression");
      let before = vec![Stmt::Line(format!("{ty} {v} = {default};"))];
      let after = vec![Stmt::Line(format!("return {v};"))];
      Ok(Plan { host: parent, before, dest: Dest::Var(v), ty: Some(ty_name), after })
    }
    SK::Arg => {
      let arg = ast::Arg::cast(parent.clone()).ok_or_else(|| util::inconsistent(&parent, "not an argument"))?;
      if arg.modifier().is_some() || !matches!(parent.parent().map(|x| x.kind()), Some(SK::ArgList | SK::BracketArgList))
      {
        return Err(util::unsupported(top, Unsupported::ChainPosition));
      }
      let host = util::host_stmt(&parent).ok_or_else(|| util::unsupported(top, Unsupported::ChainPosition))?;
      if !util::can_hoist_out_of(&host) {
        return Err(util::unsupported(&host, Unsupported::HostStmt));
      }
      util::check_hoist(whole, &host)?;
      let ty = result_type(cx, top, whole)?;
      let prefix = util::param_name(cx.resolver, &arg).unwrap_or_else(|| {
        log::debug!("no parameter name for argument {}", arg.syntax());
        "argValue".to_owned()
      });
      let v = st.scope(top).names.generate(&prefix);
      let mut before = vec![Stmt::Line(format!("{} {v} = {};", cx.display(&ty), cx.default_of(&ty)))];
      let (line_comments, inline) = paren_comments(whole, top);
      before.extend(line_comments.into_iter().map(Stmt::Comment));
      let with = if inline.is_empty() { v.clone() } else { format!("{} {v}", inline.join(" ")) };
      let after = vec![Stmt::Verbatim(util::substitute(&host, whole.text_range(), &with))];
      Ok(Plan { host, before, dest: Dest::Var(v), ty: Some(ty), after })
    }
    _ => Err(util::unsupported(top, Unsupported::ChainPosition)),
  }
}

/// The comments in the parentheses between a chain and `whole`, split into line comments and
/// block comments.
fn paren_comments(whole: &SyntaxNode, top: &SyntaxNode) -> (Vec<String>, Vec<String>) {
  let mut lines = Vec::new();
  let mut inline = Vec::new();
  let mut cur = top.clone();
  while &cur != whole {
    let Some(parent) = cur.parent() else { break };
    if parent.kind() == SK::ExprParen {
      for tok in parent.children_with_tokens().filter_map(rowan::NodeOrToken::into_token) {
        match tok.kind() {
          SK::LineComment => lines.push(tok.text().to_owned()),
          SK::BlockComment => inline.push(tok.text().to_owned()),
          _ => {}
        }
      }
    }
    cur = parent;
  }
  (lines, inline)
}

/// The type of what the whole expression evaluates to, with any fallback, else of the chain.
fn result_type(cx: Cx<'_>, top: &SyntaxNode, whole: &SyntaxNode) -> Result<TypeName, Error> {
  let text = whole.text().to_string();
  cx.resolver
    .static_type_of(&text)
    .or_else(|| cx.resolver.static_type_of(&top.text().to_string()))
    .ok_or_else(|| util::missing_type(whole, &text))
}

/// Returns the statements that evaluate the chain with explicit null checks.
fn null_checks(st: &mut St, cx: Cx<'_>, chain: &Chain, top: &SyntaxNode, dest: &Dest) -> Result<Vec<Stmt>, Error> {
  let mut ret = Vec::new();
  let local = match chain.receiver.kind() {
    SK::ExprThis => true,
    SK::ExprName => ast::ExprName::cast(chain.receiver.clone())
      .and_then(|x| x.name())
      .is_some_and(|t| util::is_local(&chain.receiver, t.text())),
    _ => false,
  };
  let (recv, ty) = if local {
    (chain.receiver_text.clone(), cx.resolver.static_type_of(&chain.receiver_text))
  } else {
    let ty = type_of(cx, top, &chain.receiver_text)?;
    let v = st.scope(top).names.generate("condExpression");
    ret.push(Stmt::Verbatim(format!("{} {v} = {};", cx.display(&ty), chain.receiver_text)));
    (v, Some(ty))
  };
  let body = level(st, cx, chain, top, dest, 0, &value_of(&recv, ty.as_ref()))?;
  ret.push(Stmt::If { cond: format!("{recv} != null"), body });
  Ok(ret)
}

/// The statements run once the receiver and the first `idx` parts are known not to be null, and
/// `recv` reads their value.
fn level(
  st: &mut St,
  cx: Cx<'_>,
  chain: &Chain,
  top: &SyntaxNode,
  dest: &Dest,
  idx: usize,
  recv: &str,
) -> Result<Vec<Stmt>, Error> {
  let part = &chain.parts[idx];
  if idx + 1 == chain.parts.len() {
    let line = match dest {
      Dest::Discard => format!("{recv}{part};"),
      Dest::Var(v) => format!("{v} = {recv}{part};"),
    };
    return Ok(vec![Stmt::Verbatim(line)]);
  }
  let ty = type_of(cx, top, &chain.prefix(idx + 1))?;
  let v = st.scope(top).names.generate("condExpression");
  let decl = Stmt::Verbatim(format!("{} {v} = {recv}{part};", cx.display(&ty)));
  let body = level(st, cx, chain, top, dest, idx + 1, &value_of(&v, Some(&ty)))?;
  Ok(vec![decl, Stmt::If { cond: format!("{v} != null"), body }])
}

/// Members of a nullable value are reached through its `Value`.
fn value_of(v: &str, ty: Option<&TypeName>) -> String {
  if ty.is_some_and(|t| util::is_nullable_value(t.as_str())) { format!("{v}.Value") } else { v.to_owned() }
}

fn type_of(cx: Cx<'_>, top: &SyntaxNode, expr: &str) -> Result<TypeName, Error> {
  cx.resolver.static_type_of(expr).ok_or_else(|| util::missing_type(top, expr))
}
