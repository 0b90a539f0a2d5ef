//! Declarations: usings, namespaces, types and their members.

use crate::expr::{arg_list, expr_must, init_block};
use crate::parser::{Exited, Parser};
use crate::stmt::{block, declarators, stmt};
use crate::{ErrorKind, Expected, ty};
use csharp_syntax::kind::SyntaxKind as SK;

/// Words that act as modifiers when another declaration word follows.
const CONTEXTUAL_MODIFIERS: [&str; 7] =
  ["async", "partial", "required", "event", "implicit", "explicit", "fixed"];

/// Parses items until the end, or until `}` if `in_braces`. Top-level statements are allowed.
pub(crate) fn items(p: &mut Parser<'_>, in_braces: bool) {
  while p.peek().is_some() {
    if p.at(SK::RCurly) {
      if in_braces {
        break;
      }
      p.error_bump(ErrorKind::Trailing);
      continue;
    }
    if item(p).is_none() && stmt(p).is_none() {
      p.error_bump(ErrorKind::Expected(Expected::Member));
    }
  }
}

#[must_use]
fn item(p: &mut Parser<'_>) -> Option<Exited> {
  if p.at(SK::UsingKw) && p.nth(1) != Some(SK::LRound) && !using_decl_ahead(p) {
    let en = p.enter();
    p.bump();
    while p.peek().is_some() && !p.at(SK::Semicolon) {
      p.bump();
    }
    p.eat(SK::Semicolon);
    return Some(p.exit(en, SK::UsingDirective));
  }
  if p.at(SK::NamespaceKw) {
    let en = p.enter();
    p.bump();
    ty::ty(p);
    if p.at(SK::Semicolon) {
      p.bump();
      items(p, false);
    } else {
      p.eat(SK::LCurly);
      items(p, true);
      p.eat(SK::RCurly);
    }
    return Some(p.exit(en, SK::NamespaceDecl));
  }
  if !decl_start_ahead(p) {
    return None;
  }
  member(p)
}

/// Whether a type or member declaration starts here, as opposed to a top-level statement.
fn decl_start_ahead(p: &Parser<'_>) -> bool {
  let mut i = 0usize;
  loop {
    match p.nth(i) {
      Some(SK::LSquare) if i == 0 => return true,
      Some(SK::ClassKw | SK::StructKw | SK::InterfaceKw | SK::EnumKw) => return true,
      Some(k) if k.is_modifier() && k != SK::NewKw => return true,
      Some(SK::Id) if p.nth_is_word(i, "record") => return true,
      Some(SK::Id)
        if CONTEXTUAL_MODIFIERS.iter().any(|w| p.nth_is_word(i, w))
          && p.nth(i + 1).is_some_and(|k| k == SK::Id || k.is_modifier()) =>
      {
        i += 1;
      }
      _ => return false,
    }
  }
}

fn using_decl_ahead(p: &Parser<'_>) -> bool {
  ty::type_len(p, 1, true).is_some_and(|n| p.nth(1 + n) == Some(SK::Id))
    && !p.nth_is_word(1, "static")
}

/// A member of a type, or a type.
#[must_use]
#[allow(clippy::too_many_lines)]
fn member(p: &mut Parser<'_>) -> Option<Exited> {
  p.peek()?;
  let en = p.enter();
  while p.at(SK::LSquare) {
    attribute(p);
  }
  loop {
    let contextual = p.at(SK::Id)
      && CONTEXTUAL_MODIFIERS.iter().any(|w| p.at_word(w))
      && p.nth(1).is_some_and(|k| k == SK::Id || k.is_modifier() || k == SK::VoidKw);
    if p.nth(0).is_some_and(SK::is_modifier) || contextual {
      p.bump();
    } else {
      break;
    }
  }
  let record = p.at_word("record")
    && p.nth(1).is_some_and(|k| matches!(k, SK::Id | SK::ClassKw | SK::StructKw));
  let kind = match p.nth(0) {
    Some(SK::ClassKw | SK::StructKw | SK::InterfaceKw) => {
      type_decl(p);
      SK::TypeDecl
    }
    _ if record => {
      p.bump();
      if p.at(SK::ClassKw) || p.at(SK::StructKw) {
        p.bump();
      }
      type_decl_rest(p);
      SK::TypeDecl
    }
    Some(SK::EnumKw) => {
      enum_decl(p);
      SK::EnumDecl
    }
    Some(SK::Tilde) => {
      p.bump();
      p.eat(SK::Id);
      param_list(p);
      body(p);
      SK::MethodDecl
    }
    Some(SK::Id) if p.nth(1) == Some(SK::LRound) => {
      p.bump();
      param_list(p);
      if p.at(SK::Colon) {
        let init = p.enter();
        p.bump();
        if p.at(SK::BaseKw) || p.at(SK::ThisKw) {
          p.bump();
        } else {
          p.error(ErrorKind::Expected(Expected::Kind(SK::BaseKw)));
        }
        if p.at(SK::LRound) {
          arg_list(p);
        }
        p.exit(init, SK::CtorInitializer);
      }
      body(p);
      SK::CtorDecl
    }
    _ => {
      if ty::ty(p).is_none() {
        p.abandon(en);
        p.error_bump(ErrorKind::Expected(Expected::Member));
        return None;
      }
      member_after_type(p)
    }
  };
  Some(p.exit(en, kind))
}

/// After the type of a field, method, property, indexer or operator.
fn member_after_type(p: &mut Parser<'_>) -> SK {
  if p.at(SK::ThisKw) {
    p.bump();
    params(p, SK::LSquare, SK::RSquare, SK::BracketParamList);
    accessors_or_body(p);
    return SK::IndexerDecl;
  }
  if p.at_word("operator") {
    while p.peek().is_some() && !p.at(SK::LRound) {
      p.bump();
    }
    param_list(p);
    body(p);
    return SK::MethodDecl;
  }
  if p.at(SK::Id) && matches!(p.nth(1), Some(SK::Eq | SK::Comma | SK::Semicolon)) {
    declarators(p);
    p.eat(SK::Semicolon);
    return SK::FieldDecl;
  }
  // explicit interface implementations, like `IFoo.Bar`
  while p.at(SK::Id) && p.nth(1) == Some(SK::Dot) {
    p.bump();
    p.bump();
  }
  p.eat(SK::Id);
  match p.nth(0) {
    Some(SK::LRound | SK::Lt) => {
      ty::type_param_list(p);
      param_list(p);
      body(p);
      SK::MethodDecl
    }
    Some(SK::LCurly | SK::FatArrow) => {
      accessors_or_body(p);
      if p.at(SK::Eq) {
        p.bump();
        if p.at(SK::LCurly) {
          init_block(p);
        } else {
          expr_must(p);
        }
        p.eat(SK::Semicolon);
      }
      SK::PropertyDecl
    }
    _ => {
      p.error(ErrorKind::Expected(Expected::Member));
      SK::FieldDecl
    }
  }
}

/// Requires we are at `class`, `struct` or `interface`.
fn type_decl(p: &mut Parser<'_>) {
  p.bump();
  type_decl_rest(p);
}

fn type_decl_rest(p: &mut Parser<'_>) {
  p.eat(SK::Id);
  ty::type_param_list(p);
  if p.at(SK::LRound) {
    param_list(p);
  }
  if p.at(SK::Colon) {
    let en = p.enter();
    p.bump();
    loop {
      ty::ty(p);
      if p.at(SK::LRound) {
        arg_list(p);
      }
      if !p.at(SK::Comma) {
        break;
      }
      p.bump();
    }
    p.exit(en, SK::BaseList);
  }
  constraints(p);
  if p.at(SK::Semicolon) {
    p.bump();
    return;
  }
  p.eat(SK::LCurly);
  while p.peek().is_some() && !p.at(SK::RCurly) {
    // on failure this already reported and made progress.
    _ = member(p);
  }
  p.eat(SK::RCurly);
  if p.at(SK::Semicolon) {
    p.bump();
  }
}

/// Requires we are at `enum`.
fn enum_decl(p: &mut Parser<'_>) {
  p.bump();
  p.eat(SK::Id);
  if p.at(SK::Colon) {
    p.bump();
    ty::ty(p);
  }
  p.eat(SK::LCurly);
  while p.peek().is_some() && !p.at(SK::RCurly) {
    let en = p.enter();
    while p.at(SK::LSquare) {
      attribute(p);
    }
    if !p.eat(SK::Id) {
      p.bump();
    }
    if p.at(SK::Eq) {
      p.bump();
      expr_must(p);
    }
    if p.at(SK::Comma) {
      p.bump();
    }
    p.exit(en, SK::EnumMember);
  }
  p.eat(SK::RCurly);
}

/// `where T : ...` clauses, kept as plain tokens.
fn constraints(p: &mut Parser<'_>) {
  if !p.at_word("where") {
    return;
  }
  while p.peek().is_some() && !matches!(p.nth(0), Some(SK::LCurly | SK::FatArrow | SK::Semicolon)) {
    p.bump();
  }
}

/// Requires we are at `[`. Brackets are matched and their contents kept as plain tokens.
fn attribute(p: &mut Parser<'_>) {
  let en = p.enter();
  let mut depth = 0usize;
  while let Some(k) = p.nth(0) {
    p.bump();
    match k {
      SK::LSquare => depth += 1,
      SK::RSquare => {
        depth -= 1;
        if depth == 0 {
          break;
        }
      }
      _ => {}
    }
  }
  p.exit(en, SK::Attribute);
}

pub(crate) fn param_list(p: &mut Parser<'_>) {
  if p.at(SK::LRound) {
    params(p, SK::LRound, SK::RRound, SK::ParamList);
  } else {
    p.error(ErrorKind::Expected(Expected::Kind(SK::LRound)));
  }
}

fn params(p: &mut Parser<'_>, open: SK, close: SK, kind: SK) {
  let en = p.enter();
  p.eat(open);
  while p.peek().is_some() && !p.at(close) {
    let param = p.enter();
    while p.at(SK::LSquare) {
      attribute(p);
    }
    while matches!(p.nth(0), Some(SK::RefKw | SK::OutKw | SK::InKw | SK::ParamsKw | SK::ThisKw)) {
      p.bump();
    }
    if ty::ty(p).is_none() {
      p.bump();
    }
    p.eat(SK::Id);
    if p.at(SK::Eq) {
      let default = p.enter();
      p.bump();
      expr_must(p);
      p.exit(default, SK::DefaultValue);
    }
    if p.at(SK::Comma) {
      p.bump();
    }
    p.exit(param, SK::Param);
  }
  p.eat(close);
  p.exit(en, kind);
}

/// A method-like body: a block, `=> expr;`, or just `;`.
pub(crate) fn body(p: &mut Parser<'_>) {
  constraints(p);
  match p.nth(0) {
    Some(SK::LCurly) => {
      block(p);
    }
    Some(SK::FatArrow) => {
      expr_body(p);
      p.eat(SK::Semicolon);
    }
    _ => {
      p.eat(SK::Semicolon);
    }
  }
}

/// Requires we are at `=>`.
fn expr_body(p: &mut Parser<'_>) {
  let en = p.enter();
  p.bump();
  expr_must(p);
  p.exit(en, SK::ExprBody);
}

/// For properties and indexers.
fn accessors_or_body(p: &mut Parser<'_>) {
  if p.at(SK::FatArrow) {
    expr_body(p);
    p.eat(SK::Semicolon);
    return;
  }
  let en = p.enter();
  p.eat(SK::LCurly);
  while p.peek().is_some() && !p.at(SK::RCurly) {
    let acc = p.enter();
    while p.at(SK::LSquare) {
      attribute(p);
    }
    while p.nth(0).is_some_and(SK::is_modifier) {
      p.bump();
    }
    if !p.eat(SK::Id) {
      p.abandon(acc);
      p.error_bump(ErrorKind::Expected(Expected::Member));
      continue;
    }
    body(p);
    p.exit(acc, SK::Accessor);
  }
  p.eat(SK::RCurly);
  p.exit(en, SK::AccessorList);
}
