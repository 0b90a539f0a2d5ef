//! Flattening object initializers into a construction followed by assignments.
//!
//! `new T(1) { F = 2, G = new U { H = 3 }, L = { 4, 5 }, [6] = 7 }` becomes, for a variable `x`:
//!
//! ```text
//! x = new T(1);
//! x.F = 2;
//! x.G = new U();
//! x.G.H = 3;
//! x.L.Add(4);
//! x.L.Add(5);
//! x[6] = 7;
//! ```
//!
//! Constructions with a collection initializer, and anonymous or target-typed constructions, are
//! left as they are.

use crate::cx::Cx;
use crate::emit::Stmt;
use crate::error::{Error, Unsupported};
use crate::splice;
use crate::st::St;
use crate::util;
use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::{SyntaxKind as SK, SyntaxNode, SyntaxToken};

pub(crate) fn get(st: &mut St, cx: Cx<'_>, mut root: SyntaxNode) -> Result<SyntaxNode, Error> {
  while let Some(new) = next(&root) {
    log::debug!("initializer at {:?}", new.syntax().text_range());
    root = rewrite(st, cx, &new)?;
    st.rewrote();
  }
  Ok(root)
}

/// Returns the first typed construction with an object initializer. Ones nested in its entries are
/// flattened along with it.
fn next(root: &SyntaxNode) -> Option<ast::ExprNew> {
  root.descendants().filter_map(ast::ExprNew::cast).find(is_flattenable)
}

fn is_flattenable(new: &ast::ExprNew) -> bool {
  new.object_init().is_some() && new.ty().is_some() && !new.is_array()
}

/// The construction without its initializer, always with an argument list.
fn construction(new: &ast::ExprNew) -> String {
  let node = new.syntax();
  let end = match (new.arg_list(), new.ty()) {
    (Some(args), _) => args.syntax().text_range().end(),
    (None, Some(ty)) => ty.syntax().text_range().end(),
    (None, None) => node.text_range().end(),
  };
  let text = node.text().to_string();
  let mut ret = text[..usize::from(end - node.text_range().start())].trim_end().to_owned();
  if new.arg_list().is_none() {
    ret.push_str("()");
  }
  ret
}

fn type_text(new: &ast::ExprNew) -> String {
  new.ty().map(|t| t.syntax().text().to_string()).unwrap_or_default()
}

fn rewrite(st: &mut St, cx: Cx<'_>, new: &ast::ExprNew) -> Result<SyntaxNode, Error> {
  let node = new.syntax();
  let init = new.object_init().ok_or_else(|| util::inconsistent(node, "construction without an initializer"))?;
  let whole = util::unparen(node);
  let parent = whole.parent().ok_or_else(|| util::unsupported(node, Unsupported::InitPosition))?;
  let head_comment = head_comment(cx, new, &init)?;
  let ty = type_text(new);
  let built = construction(new);
  let mut stmts = Vec::new();
  let (host, base, after) = match parent.kind() {
    SK::ExprStmt => {
      let v = st.scope(node).names.generate("initValue");
      stmts.push(Stmt::Verbatim(format!("{ty} {v} = {built};")));
      (parent, v, Vec::new())
    }
    SK::VarDeclarator => {
      let decl = parent.parent().and_then(ast::LocalDeclStmt::cast);
      let decl = decl.ok_or_else(|| util::unsupported(node, Unsupported::InitPosition))?;
      if decl.is_const() {
        return Err(util::unsupported(decl.syntax(), Unsupported::UsingOrConst));
      }
      if decl.declarators().count() > 1 {
        return Err(util::unsupported(decl.syntax(), Unsupported::ManyDeclarators));
      }
      let name = ast::VarDeclarator::cast(parent.clone()).and_then(|x| x.name());
      let name = name.ok_or_else(|| util::inconsistent(&parent, "declarator without a name"))?;
      let host = decl.syntax().clone();
      stmts.push(Stmt::Verbatim(util::substitute(&host, whole.text_range(), &built)));
      (host, name.text().to_owned(), Vec::new())
    }
    SK::ExprAssign => {
      let assign = ast::ExprAssign::cast(parent.clone());
      let assign = assign.ok_or_else(|| util::inconsistent(&parent, "not an assignment"))?;
      let host = parent.parent().filter(|p| p.kind() == SK::ExprStmt);
      let target = assign.lhs().map(|x| x.syntax().clone());
      let (Some(host), Some(target)) = (host, target) else {
        return Err(util::unsupported(node, Unsupported::InitPosition));
      };
      if target == whole || assign.op().is_none_or(|t| t.kind() != SK::Eq) {
        return Err(util::unsupported(node, Unsupported::InitPosition));
      }
      if !util::is_pure(&target) {
        return Err(util::unsupported(&target, Unsupported::ImpureTarget));
      }
      let target_text = target.text().to_string();
      let read = util::root_name(&target).is_none_or(|name| util::reads(init.syntax(), &name));
      if read {
        let v = st.scope(node).names.generate("initValue");
        stmts.push(Stmt::Verbatim(format!("{ty} {v} = {built};")));
        (host, v.clone(), vec![Stmt::Line(format!("{target_text} = {v};"))])
      } else {
        stmts.push(Stmt::Verbatim(util::substitute(&host, whole.text_range(), &built)));
        (host, target_text, Vec::new())
      }
    }
    SK::ReturnStmt => {
      let v = st.scope(node).names.generate("returnValue");
      stmts.push(Stmt::Verbatim(format!("{ty} {v} = {built};")));
      (parent, v.clone(), vec![Stmt::Line(format!("return {v};"))])
    }
    SK::Arg | SK::InitElement => {
      let arg = ast::Arg::cast(parent.clone());
      let ok = match &arg {
        Some(arg) => arg.modifier().is_none(),
        None => parent.parent().is_some_and(|p| p.kind() == SK::CollectionInit),
      };
      if !ok {
        return Err(util::unsupported(node, Unsupported::InitPosition));
      }
      let host = util::host_stmt(&parent).ok_or_else(|| util::unsupported(node, Unsupported::InitPosition))?;
      if !util::can_hoist_out_of(&host) {
        return Err(util::unsupported(&host, Unsupported::HostStmt));
      }
      util::check_hoist(&whole, &host)?;
      let prefix = arg.and_then(|arg| util::param_name(cx.resolver, &arg)).unwrap_or_else(|| "initValue".to_owned());
      let v = st.scope(node).names.generate(&prefix);
      stmts.push(Stmt::Verbatim(format!("{ty} {v} = {built};")));
      let after = vec![Stmt::Verbatim(util::substitute(&host, whole.text_range(), &v))];
      (host, v, after)
    }
    _ => return Err(util::unsupported(node, Unsupported::InitPosition)),
  };
  if let (Some(c), Some(Stmt::Verbatim(first))) = (head_comment, stmts.first_mut()) {
    first.push(' ');
    first.push_str(&c);
  }
  entries(st, cx, &base, &init, &mut stmts)?;
  stmts.extend(after);
  splice::replace_stmt(st, &host, stmts)
}

/// The comment trailing the construction call, between it and the first entry.
fn head_comment(cx: Cx<'_>, new: &ast::ExprNew, init: &ast::ObjectInit) -> Result<Option<String>, Error> {
  if !cx.options.preserve_trivia {
    return Ok(None);
  }
  let Some(curly) = init.syntax().first_token() else { return Ok(None) };
  let call_end = match (new.arg_list(), new.ty()) {
    (Some(args), _) => args.syntax().last_token(),
    (None, Some(ty)) => ty.syntax().last_token(),
    (None, None) => None,
  };
  let before_curly = call_end
    .into_iter()
    .flat_map(|t| std::iter::successors(t.next_token(), SyntaxToken::next_token))
    .take_while(|t| t != &curly);
  let after_curly = std::iter::successors(curly.next_token(), SyntaxToken::next_token)
    .take_while(|t| t.kind().is_trivia() && !t.text().contains('\n'));
  let comments: Vec<_> = before_curly.chain(after_curly).filter(|t| t.kind().is_comment()).collect();
  match comments.as_slice() {
    [] => Ok(None),
    [c] => Ok(Some(c.text().to_owned())),
    _ => Err(util::unsupported(new.syntax(), Unsupported::ManyTrailingComments)),
  }
}

/// Flattens the entries of `init`, which initializes `base`.
fn entries(st: &mut St, cx: Cx<'_>, base: &str, init: &ast::ObjectInit, out: &mut Vec<Stmt>) -> Result<(), Error> {
  for entry in init.entries() {
    let node = &entry.syntax().clone();
    let trivia = csharp_trivia::Trivia::of(node);
    if cx.options.preserve_trivia {
      comment_lines(&trivia.leading, &trivia.indent, out);
    }
    let start = out.len();
    match entry {
      ast::InitEntry::Member(m) => {
        let name = m.name().ok_or_else(|| util::inconsistent(node, "member without a name"))?;
        let target = format!("{base}.{}", name.text());
        value(st, cx, &target, m.value(), node, out)?;
      }
      ast::InitEntry::Indexer(i) => {
        let args = i.args().ok_or_else(|| util::inconsistent(node, "indexer without arguments"))?;
        let target = format!("{base}{}", args.syntax());
        value(st, cx, &target, i.value(), node, out)?;
      }
      ast::InitEntry::Element(_) => return Err(util::unsupported(node, Unsupported::InitElement)),
    }
    if cx.options.preserve_trivia {
      trailing(st, node, &trivia.trailing, start, out)?;
    }
  }
  if cx.options.preserve_trivia {
    let trivia_indent = init.entries().last().map(|e| csharp_trivia::indentation_of(e.syntax())).unwrap_or_default();
    comment_lines(&dangling(init.syntax()), &trivia_indent, out);
  }
  Ok(())
}

/// Flattens one entry, which sets `target` to `value`.
fn value(
  st: &mut St,
  cx: Cx<'_>,
  target: &str,
  value: Option<ast::InitValue>,
  entry: &SyntaxNode,
  out: &mut Vec<Stmt>,
) -> Result<(), Error> {
  let value = value.ok_or_else(|| util::inconsistent(entry, "entry without a value"))?;
  match value {
    ast::InitValue::Expr(ast::Expr::New(new)) if is_flattenable(&new) => {
      let init = new.object_init().ok_or_else(|| util::inconsistent(entry, "construction without an initializer"))?;
      out.push(Stmt::Verbatim(format!("{target} = {};", construction(&new))));
      entries(st, cx, target, &init, out)
    }
    ast::InitValue::Expr(e) => {
      out.push(Stmt::Verbatim(format!("{target} = {};", e.syntax())));
      Ok(())
    }
    ast::InitValue::Object(init) => entries(st, cx, target, &init, out),
    ast::InitValue::Collection(coll) => {
      for elem in coll.entries() {
        let node = &elem.syntax().clone();
        let trivia = csharp_trivia::Trivia::of(node);
        if cx.options.preserve_trivia {
          comment_lines(&trivia.leading, &trivia.indent, out);
        }
        let start = out.len();
        let ast::InitEntry::Element(elem) = elem else {
          return Err(util::inconsistent(node, "collection entry that is not an element"));
        };
        let args = match elem.value() {
          Some(ast::InitValue::Collection(inner)) => {
            let args: Vec<_> = inner.entries().map(|e| element_text(e.syntax())).collect();
            args.join(", ")
          }
          Some(v) => v.syntax().to_string(),
          None => return Err(util::inconsistent(node, "element without a value")),
        };
        out.push(Stmt::Verbatim(format!("{target}.Add({args});")));
        if cx.options.preserve_trivia {
          trailing(st, node, &trivia.trailing, start, out)?;
        }
      }
      Ok(())
    }
  }
}

/// The text of an element, without its comma.
fn element_text(node: &SyntaxNode) -> String {
  ast::InitElement::cast(node.clone())
    .and_then(|x| x.value())
    .map_or_else(|| node.to_string(), |v| v.syntax().to_string())
}

/// Adds `comments`, found at `indent`, as lines of their own.
fn comment_lines(comments: &[String], indent: &str, out: &mut Vec<Stmt>) {
  if comments.is_empty() {
    return;
  }
  let shifted: Vec<_> = comments.iter().map(|c| csharp_trivia::shift_indentation(c, indent, "")).collect();
  let text = csharp_trivia::extract_trailing_comments(&shifted, "", "\n");
  out.push(Stmt::Comment(text.trim_end_matches('\n').to_owned()));
}

/// Puts the comment trailing an entry after the last statement generated for it.
fn trailing(
  st: &mut St,
  entry: &SyntaxNode,
  comments: &[String],
  start: usize,
  out: &mut [Stmt],
) -> Result<(), Error> {
  match comments {
    [] => Ok(()),
    [c] => {
      if let Some(Stmt::Verbatim(last) | Stmt::Line(last)) = out[start..].last_mut() {
        last.push(' ');
        last.push_str(c);
      } else {
        st.warn(entry.text_range(), format!("dropped comment after entry that sets nothing: {c}"));
      }
      Ok(())
    }
    _ => Err(util::unsupported(entry, Unsupported::ManyTrailingComments)),
  }
}

/// The comments on their own lines after the last entry, before `}`.
fn dangling(init: &SyntaxNode) -> Vec<String> {
  let last = init.children().last().map(|n| n.text_range().end());
  let tail = init
    .children_with_tokens()
    .filter_map(rowan::NodeOrToken::into_token)
    .filter(|t| last.is_none_or(|end| t.text_range().start() >= end));
  let mut ret = Vec::new();
  let mut own_line = false;
  for tok in tail {
    match tok.kind() {
      SK::Whitespace => own_line |= tok.text().contains('\n'),
      SK::LineComment | SK::BlockComment if own_line => {
        ret.push(tok.text().to_owned());
        own_line = false;
      }
      _ => own_line = false,
    }
  }
  ret
}
