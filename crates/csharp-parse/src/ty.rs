//! Types, and the lookahead used to tell them apart from expressions.

use crate::parser::{Exited, Parser};
use crate::{ErrorKind, Expected};
use csharp_syntax::kind::SyntaxKind as SK;

/// Returns how many tokens, starting at the `n`th, form a type. With `ranks`, trailing array ranks
/// like `[]` and `[,]` are part of it.
pub(crate) fn type_len(p: &Parser<'_>, n: usize, ranks: bool) -> Option<usize> {
  let mut i = n;
  match p.nth(i)? {
    SK::Id | SK::VoidKw => i += 1,
    SK::LRound => {
      i += 1;
      loop {
        i += type_len(p, i, true)?;
        if p.nth(i) == Some(SK::Id) {
          i += 1;
        }
        match p.nth(i)? {
          SK::Comma => i += 1,
          SK::RRound => {
            i += 1;
            break;
          }
          _ => return None,
        }
      }
    }
    _ => return None,
  }
  loop {
    match p.nth(i) {
      Some(SK::Lt) => match type_args_len(p, i) {
        Some(k) => i += k,
        None => break,
      },
      Some(SK::Dot | SK::ColonColon) if p.nth(i + 1) == Some(SK::Id) => i += 2,
      _ => break,
    }
  }
  if p.nth(i) == Some(SK::Question) {
    i += 1;
  }
  while ranks && p.nth(i) == Some(SK::LSquare) {
    let mut j = i + 1;
    while p.nth(j) == Some(SK::Comma) {
      j += 1;
    }
    if p.nth(j) != Some(SK::RSquare) {
      break;
    }
    i = j + 1;
    if p.nth(i) == Some(SK::Question) {
      i += 1;
    }
  }
  Some(i - n)
}

/// Requires the `n`th token be `<`. Returns the length of the whole `<...>`.
pub(crate) fn type_args_len(p: &Parser<'_>, n: usize) -> Option<usize> {
  let mut i = n + 1;
  loop {
    i += type_len(p, i, true)?;
    match p.nth(i)? {
      SK::Comma => i += 1,
      SK::Gt => return Some(i + 1 - n),
      _ => return None,
    }
  }
}

/// Whether a declaration `Type name` starts here, followed by one of `follow`.
pub(crate) fn decl_ahead(p: &Parser<'_>, follow: &[SK]) -> bool {
  type_len(p, 0, true).is_some_and(|n| {
    p.nth(n) == Some(SK::Id) && p.nth(n + 1).is_some_and(|k| follow.contains(&k))
  })
}

pub(crate) fn ty(p: &mut Parser<'_>) -> Option<Exited> {
  ty_with(p, true)
}

pub(crate) fn ty_with(p: &mut Parser<'_>, ranks: bool) -> Option<Exited> {
  let Some(n) = type_len(p, 0, ranks) else {
    p.error(ErrorKind::Expected(Expected::Type));
    return None;
  };
  let en = p.enter();
  for _ in 0..n {
    p.bump();
  }
  Some(p.exit(en, SK::TypeRef))
}

/// Parses `<...>` after a generic name, if it is there.
pub(crate) fn type_arg_list(p: &mut Parser<'_>) -> Option<Exited> {
  let n = type_args_len(p, 0)?;
  let en = p.enter();
  for _ in 0..n {
    p.bump();
  }
  Some(p.exit(en, SK::TypeArgList))
}

/// Parses `<T, U>` on a declaration, or nothing.
pub(crate) fn type_param_list(p: &mut Parser<'_>) {
  if !p.at(SK::Lt) {
    return;
  }
  let en = p.enter();
  p.bump();
  while p.peek().is_some() && !p.at(SK::Gt) {
    p.bump();
  }
  p.eat(SK::Gt);
  p.exit(en, SK::TypeParamList);
}
