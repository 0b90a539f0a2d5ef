//! Parse a sequence of tokens into a lossless concrete syntax tree.

mod expr;
mod item;
mod parser;
mod stmt;
mod ty;

#[cfg(test)]
mod tests;

use csharp_lex::Token;
use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::SyntaxKind as SK;
use parser::Parser;
use std::fmt;
use text_size::TextRange;

/// Parses a whole compilation unit.
///
/// # Panics
///
/// Upon internal error.
#[must_use]
pub fn get(tokens: &[Token<'_>]) -> Parse {
  let mut p = Parser::new(tokens);
  let en = p.enter();
  item::items(&mut p, false);
  p.exit(en, SK::Root);
  let (node, errors) = p.finish();
  let root = ast::Root::cast(node).expect("root should be Root");
  Parse { root, errors }
}

/// Parses a bare list of statements, as produced by a rewrite.
///
/// # Panics
///
/// Upon internal error.
#[must_use]
pub fn fragment(tokens: &[Token<'_>]) -> Fragment {
  let mut p = Parser::new(tokens);
  let en = p.enter();
  while p.peek().is_some() {
    if p.at(SK::RCurly) {
      p.error_bump(ErrorKind::Trailing);
    } else if stmt::stmt(&mut p).is_none() {
      p.error_bump(ErrorKind::Expected(Expected::Stmt));
    }
  }
  p.exit(en, SK::StmtList);
  let (node, errors) = p.finish();
  let list = ast::StmtList::cast(node).expect("root should be StmtList");
  Fragment { list, errors }
}

/// The result of parsing a compilation unit.
#[derive(Debug)]
pub struct Parse {
  /// The root.
  pub root: ast::Root,
  /// The errors.
  pub errors: Vec<Error>,
}

/// The result of parsing a statement list.
#[derive(Debug)]
pub struct Fragment {
  /// The statements.
  pub list: ast::StmtList,
  /// The errors.
  pub errors: Vec<Error>,
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  range: TextRange,
  kind: ErrorKind,
}

impl Error {
  /// Returns the range this error covers.
  #[must_use]
  pub fn range(&self) -> TextRange {
    self.range
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      ErrorKind::Trailing => f.write_str("unmatched `}`"),
      ErrorKind::Expected(e) => write!(f, "expected {e}"),
    }
  }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ErrorKind {
  /// A `}` closing nothing.
  Trailing,
  Expected(Expected),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expected {
  Expr,
  Stmt,
  Member,
  Type,
  Kind(SK),
}

impl fmt::Display for Expected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expected::Expr => f.write_str("an expression"),
      Expected::Stmt => f.write_str("a statement"),
      Expected::Member => f.write_str("a declaration"),
      Expected::Type => f.write_str("a type"),
      Expected::Kind(k) => k.fmt(f),
    }
  }
}
