//! Expressions, with a Pratt loop for operator precedence.

use crate::parser::{Exited, Parser};
use crate::{ErrorKind, Expected, stmt, ty};
use csharp_syntax::kind::SyntaxKind as SK;

/// errors but does not advance iff no expr
pub(crate) fn expr_must(p: &mut Parser<'_>) {
  expr_prec_must(p, Prec::Min);
}

/// returns `Some(_)` iff this consumed something because we could start parsing an expression.
#[must_use]
pub(crate) fn expr(p: &mut Parser<'_>) -> Option<Exited> {
  expr_prec(p, Prec::Min)
}

fn expr_prec_must(p: &mut Parser<'_>, min_prec: Prec) {
  if expr_prec(p, min_prec).is_none() {
    p.error(ErrorKind::Expected(Expected::Expr));
  }
}

#[must_use]
#[allow(clippy::too_many_lines)]
fn expr_prec(p: &mut Parser<'_>, min_prec: Prec) -> Option<Exited> {
  let mut ex = primary(p)?;
  while let Some(cur) = p.nth(0) {
    ex = match cur {
      // postfix forms bind tighter than anything, so they ignore `min_prec`.
      SK::Dot | SK::QuestionDot => {
        let en = p.precede(ex);
        p.bump();
        p.eat(SK::Id);
        generic_args(p);
        p.exit(en, if cur == SK::Dot { SK::ExprMember } else { SK::ExprCondMember })
      }
      SK::LSquare | SK::QuestionLSquare => {
        let en = p.precede(ex);
        bracket_arg_list(p);
        p.exit(en, if cur == SK::LSquare { SK::ExprIndex } else { SK::ExprCondIndex })
      }
      SK::LRound => {
        let en = p.precede(ex);
        arg_list(p);
        p.exit(en, SK::ExprCall)
      }
      SK::PlusPlus | SK::MinusMinus => {
        let en = p.precede(ex);
        p.bump();
        p.exit(en, SK::ExprPostfix)
      }
      // null-forgiving `x!`
      SK::Bang
        if p.nth(1).is_some_and(|k| {
          matches!(k, SK::Dot | SK::LSquare | SK::RRound | SK::RSquare | SK::Semicolon | SK::Comma)
        }) =>
      {
        let en = p.precede(ex);
        p.bump();
        p.exit(en, SK::ExprPostfix)
      }
      SK::IsKw | SK::AsKw => {
        if Prec::Rel <= min_prec {
          break;
        }
        let en = p.precede(ex);
        p.bump();
        if cur == SK::IsKw {
          pattern(p);
          p.exit(en, SK::ExprIs)
        } else {
          ty::ty(p);
          p.exit(en, SK::ExprAs)
        }
      }
      SK::Question => {
        if Prec::Cond <= min_prec {
          break;
        }
        let en = p.precede(ex);
        p.bump();
        expr_must(p);
        p.eat(SK::Colon);
        expr_prec_must(p, Prec::Assign);
        p.exit(en, SK::ExprConditional)
      }
      _ => match bin_op(p) {
        Some(op) => {
          if op.prec <= min_prec {
            break;
          }
          let en = p.precede(ex);
          for _ in 0..op.tokens {
            p.bump();
          }
          expr_prec_must(p, op.rhs_min);
          p.exit(en, op.kind)
        }
        None => break,
      },
    };
  }
  Some(ex)
}

#[must_use]
#[allow(clippy::too_many_lines)]
fn primary(p: &mut Parser<'_>) -> Option<Exited> {
  let cur = p.peek()?;
  if lambda_ahead(p) {
    return Some(lambda(p));
  }
  let en = p.enter();
  let kind = match cur.kind {
    SK::Id if cur.text == "await" && p.nth(1).is_some_and(starts_operand) => {
      p.bump();
      expr_prec_must(p, Prec::Unary);
      SK::ExprUnary
    }
    SK::Id => {
      p.bump();
      generic_args(p);
      SK::ExprName
    }
    SK::Number | SK::String | SK::Char | SK::TrueKw | SK::FalseKw | SK::NullKw => {
      p.bump();
      SK::ExprLit
    }
    SK::ThisKw => {
      p.bump();
      SK::ExprThis
    }
    SK::BaseKw => {
      p.bump();
      SK::ExprBase
    }
    SK::LRound if cast_ahead(p) => {
      p.bump();
      ty::ty(p);
      p.eat(SK::RRound);
      expr_prec_must(p, Prec::Unary);
      SK::ExprCast
    }
    SK::LRound => {
      p.bump();
      expr_must(p);
      // tuples
      while p.at(SK::Comma) {
        p.bump();
        expr_must(p);
      }
      p.eat(SK::RRound);
      SK::ExprParen
    }
    SK::NewKw => {
      new(p);
      SK::ExprNew
    }
    SK::DefaultKw => {
      p.bump();
      if p.at(SK::LRound) {
        p.bump();
        ty::ty(p);
        p.eat(SK::RRound);
      }
      SK::ExprDefault
    }
    SK::TypeofKw => {
      p.bump();
      p.eat(SK::LRound);
      ty::ty(p);
      p.eat(SK::RRound);
      SK::ExprTypeof
    }
    SK::ThrowKw => {
      p.bump();
      expr_must(p);
      SK::ExprUnary
    }
    SK::Minus
    | SK::Plus
    | SK::Bang
    | SK::Tilde
    | SK::PlusPlus
    | SK::MinusMinus
    | SK::Amp
    | SK::Star => {
      p.bump();
      expr_prec_must(p, Prec::Unary);
      SK::ExprUnary
    }
    _ => {
      p.abandon(en);
      return None;
    }
  };
  Some(p.exit(en, kind))
}

/// Requires we are at `new`.
fn new(p: &mut Parser<'_>) {
  p.bump();
  // `new { .. }` is anonymous, `new(..)` is target-typed.
  if !p.at(SK::LSquare) && !p.at(SK::LCurly) && !p.at(SK::LRound) {
    ty::ty_with(p, false);
  }
  while p.at(SK::LSquare) {
    let en = p.enter();
    p.bump();
    while p.peek().is_some() && !p.at(SK::RSquare) {
      if p.at(SK::Comma) {
        p.bump();
      } else if expr(p).is_none() {
        p.error_bump(ErrorKind::Expected(Expected::Expr));
      }
    }
    p.eat(SK::RSquare);
    p.exit(en, SK::ArrayRank);
  }
  if p.at(SK::LRound) {
    arg_list(p);
  }
  if p.at(SK::LCurly) {
    init_block(p);
  }
}

/// Requires we are at `{`. The kind of block is decided by its first entry: member or indexer
/// assignments make an object initializer, anything else a collection initializer.
pub(crate) fn init_block(p: &mut Parser<'_>) -> Exited {
  let object = match p.nth(1) {
    Some(SK::RCurly | SK::LSquare) => true,
    Some(SK::Id) => p.nth(2) == Some(SK::Eq),
    _ => false,
  };
  if object { object_init(p) } else { collection_init(p) }
}

fn object_init(p: &mut Parser<'_>) -> Exited {
  let en = p.enter();
  p.bump();
  while p.peek().is_some() && !p.at(SK::RCurly) {
    let entry = p.enter();
    let kind = if p.at(SK::LSquare) {
      bracket_arg_list(p);
      p.eat(SK::Eq);
      init_value(p);
      SK::InitIndexer
    } else if p.at(SK::Id) && p.nth(1) == Some(SK::Eq) {
      p.bump();
      p.bump();
      init_value(p);
      SK::InitMember
    } else if expr(p).is_some() {
      SK::InitElement
    } else {
      p.abandon(entry);
      p.error_bump(ErrorKind::Expected(Expected::Expr));
      continue;
    };
    if p.at(SK::Comma) {
      p.bump();
    }
    p.exit(entry, kind);
  }
  p.eat(SK::RCurly);
  p.exit(en, SK::ObjectInit)
}

/// Requires we are at `{`.
pub(crate) fn collection_init(p: &mut Parser<'_>) -> Exited {
  let en = p.enter();
  p.bump();
  while p.peek().is_some() && !p.at(SK::RCurly) {
    let entry = p.enter();
    if p.at(SK::LCurly) {
      collection_init(p);
    } else if expr(p).is_none() {
      p.abandon(entry);
      p.error_bump(ErrorKind::Expected(Expected::Expr));
      continue;
    }
    if p.at(SK::Comma) {
      p.bump();
    }
    p.exit(entry, SK::InitElement);
  }
  p.eat(SK::RCurly);
  p.exit(en, SK::CollectionInit)
}

fn init_value(p: &mut Parser<'_>) {
  if p.at(SK::LCurly) {
    init_block(p);
  } else {
    expr_must(p);
  }
}

pub(crate) fn arg_list(p: &mut Parser<'_>) -> Exited {
  args(p, SK::RRound, SK::ArgList)
}

fn bracket_arg_list(p: &mut Parser<'_>) -> Exited {
  args(p, SK::RSquare, SK::BracketArgList)
}

/// Requires we are at the opening token.
fn args(p: &mut Parser<'_>, close: SK, kind: SK) -> Exited {
  let en = p.enter();
  p.bump();
  while p.peek().is_some() && !p.at(close) {
    arg(p);
  }
  p.eat(close);
  p.exit(en, kind)
}

fn arg(p: &mut Parser<'_>) {
  let en = p.enter();
  if p.at(SK::Id) && p.nth(1) == Some(SK::Colon) {
    p.bump();
    p.bump();
  }
  let out = p.at(SK::OutKw);
  if matches!(p.nth(0), Some(SK::RefKw | SK::OutKw | SK::InKw)) {
    p.bump();
  }
  if out && ty::decl_ahead(p, &[SK::Comma, SK::RRound]) {
    let decl = p.enter();
    ty::ty(p);
    p.bump();
    p.exit(decl, SK::DeclExpr);
  } else if expr(p).is_none() {
    p.error(ErrorKind::Expected(Expected::Expr));
    if !p.at(SK::Comma) {
      p.error_bump(ErrorKind::Expected(Expected::Expr));
    }
  }
  if p.at(SK::Comma) {
    p.bump();
  }
  p.exit(en, SK::Arg);
}

/// The right side of `is`.
fn pattern(p: &mut Parser<'_>) {
  if p.at_word("not") {
    p.bump();
  }
  let lit = matches!(
    p.nth(0),
    Some(SK::NullKw | SK::Number | SK::String | SK::Char | SK::TrueKw | SK::FalseKw)
  );
  if lit {
    let en = p.enter();
    p.bump();
    p.exit(en, SK::ExprLit);
  } else {
    ty::ty(p);
    if p.at(SK::Id) && !p.at_word("and") && !p.at_word("or") {
      p.bump();
    }
  }
}

/// Parses `<...>` after a name, if what follows makes it a generic invocation.
fn generic_args(p: &mut Parser<'_>) {
  if p.at(SK::Lt) && ty::type_args_len(p, 0).is_some_and(|n| p.nth(n) == Some(SK::LRound)) {
    ty::type_arg_list(p);
  }
}

fn lambda_ahead(p: &Parser<'_>) -> bool {
  let start = usize::from(p.at_word("async") && p.nth(1).is_some_and(|k| k != SK::FatArrow));
  match p.nth(start) {
    Some(SK::Id) => p.nth(start + 1) == Some(SK::FatArrow),
    Some(SK::LRound) => {
      let mut depth = 0usize;
      let mut i = start;
      while let Some(k) = p.nth(i) {
        match k {
          SK::LRound => depth += 1,
          SK::RRound => {
            depth -= 1;
            if depth == 0 {
              return p.nth(i + 1) == Some(SK::FatArrow);
            }
          }
          SK::Semicolon | SK::LCurly | SK::RCurly => return false,
          _ => {}
        }
        i += 1;
      }
      false
    }
    _ => false,
  }
}

fn lambda(p: &mut Parser<'_>) -> Exited {
  let en = p.enter();
  if p.at_word("async") && p.nth(1) != Some(SK::FatArrow) {
    p.bump();
  }
  if p.at(SK::Id) {
    let param = p.enter();
    p.bump();
    p.exit(param, SK::Param);
  } else {
    let params = p.enter();
    p.bump();
    while p.peek().is_some() && !p.at(SK::RRound) {
      let param = p.enter();
      if matches!(p.nth(0), Some(SK::RefKw | SK::OutKw | SK::InKw)) {
        p.bump();
      }
      if ty::decl_ahead(p, &[SK::Comma, SK::RRound]) {
        ty::ty(p);
      }
      if !p.eat(SK::Id) {
        p.bump();
      }
      if p.at(SK::Comma) {
        p.bump();
      }
      p.exit(param, SK::Param);
    }
    p.eat(SK::RRound);
    p.exit(params, SK::LambdaParams);
  }
  p.eat(SK::FatArrow);
  if p.at(SK::LCurly) {
    stmt::block(p);
  } else {
    expr_must(p);
  }
  p.exit(en, SK::ExprLambda)
}

/// Whether `(` starts a cast. The parenthesized part must be a type, and what follows must start
/// an operand that could not instead continue a parenthesized expression.
fn cast_ahead(p: &Parser<'_>) -> bool {
  let Some(n) = ty::type_len(p, 1, true) else { return false };
  p.nth(1 + n) == Some(SK::RRound)
    && p.nth(2 + n).is_some_and(|k| {
      matches!(
        k,
        SK::Id
          | SK::Number
          | SK::String
          | SK::Char
          | SK::LRound
          | SK::ThisKw
          | SK::BaseKw
          | SK::NewKw
          | SK::TrueKw
          | SK::FalseKw
          | SK::NullKw
          | SK::DefaultKw
          | SK::TypeofKw
          | SK::Bang
          | SK::Tilde
      )
    })
}

fn starts_operand(kind: SK) -> bool {
  matches!(
    kind,
    SK::Id | SK::LRound | SK::ThisKw | SK::BaseKw | SK::NewKw | SK::Number | SK::String
  )
}

struct BinOp {
  prec: Prec,
  rhs_min: Prec,
  kind: SK,
  tokens: usize,
}

fn bin_op(p: &Parser<'_>) -> Option<BinOp> {
  let cur = p.nth(0)?;
  let (prec, kind) = match cur {
    SK::Eq
    | SK::PlusEq
    | SK::MinusEq
    | SK::StarEq
    | SK::SlashEq
    | SK::PercentEq
    | SK::AmpEq
    | SK::BarEq
    | SK::CaretEq
    | SK::LtLtEq
    | SK::QuestionQuestionEq => {
      return Some(BinOp { prec: Prec::Assign, rhs_min: Prec::Min, kind: SK::ExprAssign, tokens: 1 });
    }
    SK::QuestionQuestion => {
      return Some(BinOp {
        prec: Prec::Coalesce,
        rhs_min: Prec::Cond,
        kind: SK::ExprBinary,
        tokens: 1,
      });
    }
    SK::Gt if p.nth(1) == Some(SK::Gt) => {
      return Some(BinOp { prec: Prec::Shift, rhs_min: Prec::Shift, kind: SK::ExprBinary, tokens: 2 });
    }
    SK::BarBar => (Prec::LogicalOr, SK::ExprBinary),
    SK::AmpAmp => (Prec::LogicalAnd, SK::ExprBinary),
    SK::Bar => (Prec::BitOr, SK::ExprBinary),
    SK::Caret => (Prec::BitXor, SK::ExprBinary),
    SK::Amp => (Prec::BitAnd, SK::ExprBinary),
    SK::EqEq | SK::BangEq => (Prec::Eq, SK::ExprBinary),
    SK::Lt | SK::Gt | SK::LtEq | SK::GtEq => (Prec::Rel, SK::ExprBinary),
    SK::LtLt => (Prec::Shift, SK::ExprBinary),
    SK::Plus | SK::Minus => (Prec::Add, SK::ExprBinary),
    SK::Star | SK::Slash | SK::Percent => (Prec::Mul, SK::ExprBinary),
    _ => return None,
  };
  Some(BinOp { prec, rhs_min: prec, kind, tokens: 1 })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
  Min,
  Assign,
  Cond,
  Coalesce,
  LogicalOr,
  LogicalAnd,
  BitOr,
  BitXor,
  BitAnd,
  Eq,
  Rel,
  Shift,
  Add,
  Mul,
  Unary,
}
