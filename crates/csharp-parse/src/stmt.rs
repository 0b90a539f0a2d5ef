//! Statements.

use crate::expr::{collection_init, expr, expr_must};
use crate::parser::{Exited, Parser};
use crate::{ErrorKind, Expected, item, ty};
use csharp_syntax::kind::SyntaxKind as SK;

#[must_use]
#[allow(clippy::too_many_lines)]
pub(crate) fn stmt(p: &mut Parser<'_>) -> Option<Exited> {
  let cur = p.peek()?;
  if cur.kind == SK::LCurly {
    return Some(block(p));
  }
  if let Some(mods) = local_func_ahead(p) {
    return Some(local_func(p, mods));
  }
  if local_decl_ahead(p) {
    let en = p.enter();
    if p.at(SK::UsingKw) {
      p.bump();
    }
    if p.at(SK::ConstKw) {
      p.bump();
    }
    ty::ty(p);
    declarators(p);
    p.eat(SK::Semicolon);
    return Some(p.exit(en, SK::LocalDeclStmt));
  }
  let en = p.enter();
  let kind = match cur.kind {
    SK::Semicolon => {
      p.bump();
      SK::EmptyStmt
    }
    SK::IfKw => {
      p.bump();
      paren_expr(p);
      embedded(p);
      if p.at(SK::ElseKw) {
        let en = p.enter();
        p.bump();
        embedded(p);
        p.exit(en, SK::ElseClause);
      }
      SK::IfStmt
    }
    SK::WhileKw => {
      p.bump();
      paren_expr(p);
      embedded(p);
      SK::WhileStmt
    }
    SK::DoKw => {
      p.bump();
      embedded(p);
      p.eat(SK::WhileKw);
      paren_expr(p);
      p.eat(SK::Semicolon);
      SK::DoStmt
    }
    SK::ForKw => {
      p.bump();
      for_header(p);
      embedded(p);
      SK::ForStmt
    }
    SK::ForeachKw => {
      p.bump();
      p.eat(SK::LRound);
      ty::ty(p);
      p.eat(SK::Id);
      p.eat(SK::InKw);
      expr_must(p);
      p.eat(SK::RRound);
      embedded(p);
      SK::ForeachStmt
    }
    SK::ReturnKw | SK::ThrowKw => {
      p.bump();
      if !p.at(SK::Semicolon) {
        expr_must(p);
      }
      p.eat(SK::Semicolon);
      if cur.kind == SK::ReturnKw { SK::ReturnStmt } else { SK::ThrowStmt }
    }
    SK::BreakKw | SK::ContinueKw => {
      p.bump();
      p.eat(SK::Semicolon);
      if cur.kind == SK::BreakKw { SK::BreakStmt } else { SK::ContinueStmt }
    }
    SK::TryKw => {
      p.bump();
      block_must(p);
      while p.at(SK::CatchKw) {
        catch_clause(p);
      }
      if p.at(SK::FinallyKw) {
        let en = p.enter();
        p.bump();
        block_must(p);
        p.exit(en, SK::FinallyClause);
      }
      SK::TryStmt
    }
    SK::SwitchKw => {
      p.bump();
      paren_expr(p);
      p.eat(SK::LCurly);
      while p.peek().is_some() && !p.at(SK::RCurly) {
        switch_section(p);
      }
      p.eat(SK::RCurly);
      SK::SwitchStmt
    }
    SK::LockKw => {
      p.bump();
      paren_expr(p);
      embedded(p);
      SK::LockStmt
    }
    SK::UsingKw => {
      p.bump();
      p.eat(SK::LRound);
      if ty::decl_ahead(p, &[SK::Eq]) {
        ty::ty(p);
        declarators(p);
      } else {
        expr_must(p);
      }
      p.eat(SK::RRound);
      embedded(p);
      SK::UsingStmt
    }
    SK::Id if cur.text == "yield" && matches!(p.nth(1), Some(SK::ReturnKw | SK::BreakKw)) => {
      p.bump();
      if p.at(SK::ReturnKw) {
        p.bump();
        expr_must(p);
      } else {
        p.bump();
      }
      p.eat(SK::Semicolon);
      SK::YieldStmt
    }
    _ => {
      if expr(p).is_none() {
        p.abandon(en);
        return None;
      }
      p.eat(SK::Semicolon);
      SK::ExprStmt
    }
  };
  Some(p.exit(en, kind))
}

/// Requires we are at `{`.
pub(crate) fn block(p: &mut Parser<'_>) -> Exited {
  let en = p.enter();
  p.bump();
  while p.peek().is_some() && !p.at(SK::RCurly) {
    if stmt(p).is_none() {
      p.error_bump(ErrorKind::Expected(Expected::Stmt));
    }
  }
  p.eat(SK::RCurly);
  p.exit(en, SK::Block)
}

pub(crate) fn block_must(p: &mut Parser<'_>) {
  if p.at(SK::LCurly) {
    block(p);
  } else {
    p.error(ErrorKind::Expected(Expected::Kind(SK::LCurly)));
  }
}

/// A statement nested in another, like the body of a loop.
fn embedded(p: &mut Parser<'_>) {
  if stmt(p).is_none() {
    p.error(ErrorKind::Expected(Expected::Stmt));
  }
}

fn paren_expr(p: &mut Parser<'_>) {
  p.eat(SK::LRound);
  expr_must(p);
  p.eat(SK::RRound);
}

/// One or more `name = value`, separated by commas.
pub(crate) fn declarators(p: &mut Parser<'_>) {
  loop {
    let en = p.enter();
    p.eat(SK::Id);
    if p.at(SK::Eq) {
      p.bump();
      if p.at(SK::LCurly) {
        collection_init(p);
      } else {
        expr_must(p);
      }
    }
    let comma = p.at(SK::Comma);
    if comma {
      p.bump();
    }
    p.exit(en, SK::VarDeclarator);
    if !comma {
      break;
    }
  }
}

fn local_decl_ahead(p: &Parser<'_>) -> bool {
  match p.nth(0) {
    Some(SK::ConstKw) => true,
    Some(SK::UsingKw) => p.nth(1) != Some(SK::LRound),
    _ => ty::decl_ahead(p, &[SK::Eq, SK::Semicolon, SK::Comma]),
  }
}

/// Returns how many modifiers precede a local function starting here, if one does.
fn local_func_ahead(p: &Parser<'_>) -> Option<usize> {
  if p.at_word("await") {
    return None;
  }
  let mut mods = 0usize;
  while p.nth(mods).is_some_and(|k| matches!(k, SK::StaticKw | SK::UnsafeKw))
    || p.nth_is_word(mods, "async")
  {
    mods += 1;
  }
  let n = ty::type_len(p, mods, true)?;
  let is_func = p.nth(mods + n) == Some(SK::Id)
    && matches!(p.nth(mods + n + 1), Some(SK::LRound | SK::Lt));
  is_func.then_some(mods)
}

fn local_func(p: &mut Parser<'_>, mods: usize) -> Exited {
  let en = p.enter();
  for _ in 0..mods {
    p.bump();
  }
  ty::ty(p);
  p.eat(SK::Id);
  ty::type_param_list(p);
  item::param_list(p);
  item::body(p);
  p.exit(en, SK::LocalFuncStmt)
}

fn for_header(p: &mut Parser<'_>) {
  p.eat(SK::LRound);
  if !p.at(SK::Semicolon) {
    let en = p.enter();
    if ty::decl_ahead(p, &[SK::Eq, SK::Comma, SK::Semicolon]) {
      ty::ty(p);
      declarators(p);
    } else {
      expr_list(p);
    }
    p.exit(en, SK::ForInit);
  }
  p.eat(SK::Semicolon);
  if !p.at(SK::Semicolon) {
    let en = p.enter();
    expr_must(p);
    p.exit(en, SK::ForCond);
  }
  p.eat(SK::Semicolon);
  if !p.at(SK::RRound) {
    let en = p.enter();
    expr_list(p);
    p.exit(en, SK::ForIter);
  }
  p.eat(SK::RRound);
}

fn expr_list(p: &mut Parser<'_>) {
  loop {
    expr_must(p);
    if !p.at(SK::Comma) {
      break;
    }
    p.bump();
  }
}

/// Requires we are at `catch`.
fn catch_clause(p: &mut Parser<'_>) {
  let en = p.enter();
  p.bump();
  if p.at(SK::LRound) {
    let decl = p.enter();
    p.bump();
    ty::ty(p);
    if p.at(SK::Id) {
      p.bump();
    }
    p.eat(SK::RRound);
    p.exit(decl, SK::CatchDecl);
  }
  if p.at_word("when") {
    p.bump();
    paren_expr(p);
  }
  block_must(p);
  p.exit(en, SK::CatchClause);
}

fn at_label(p: &Parser<'_>) -> bool {
  p.at(SK::CaseKw) || (p.at(SK::DefaultKw) && p.nth(1) == Some(SK::Colon))
}

fn switch_section(p: &mut Parser<'_>) {
  if !at_label(p) {
    p.error_bump(ErrorKind::Expected(Expected::Kind(SK::CaseKw)));
    return;
  }
  let en = p.enter();
  while at_label(p) {
    let label = p.enter();
    let kind = if p.at(SK::CaseKw) {
      p.bump();
      if ty::decl_ahead(p, &[SK::Colon]) {
        ty::ty(p);
        p.bump();
      } else {
        expr_must(p);
      }
      if p.at_word("when") {
        p.bump();
        expr_must(p);
      }
      SK::CaseLabel
    } else {
      p.bump();
      SK::DefaultLabel
    };
    p.eat(SK::Colon);
    p.exit(label, kind);
  }
  while p.peek().is_some() && !p.at(SK::RCurly) && !at_label(p) {
    if stmt(p).is_none() {
      p.error_bump(ErrorKind::Expected(Expected::Stmt));
    }
  }
  p.exit(en, SK::SwitchSection);
}
