//! Errors.

use std::fmt;
use text_size::TextRange;

/// An error when desugaring. Fatal to the pass that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  pub(crate) range: TextRange,
  pub(crate) kind: Kind,
}

impl Error {
  /// The range of the error, in the tree the pass was given. An error inside code generated by the
  /// pass points at the start of the code it replaced.
  #[must_use]
  pub fn range(&self) -> TextRange {
    self.range
  }

  /// The category of the error.
  #[must_use]
  pub fn kind(&self) -> ErrorKind {
    match self.kind {
      Kind::Unsupported(..) => ErrorKind::UnsupportedConstruct,
      Kind::Inconsistent(_) => ErrorKind::InconsistentTree,
      Kind::MissingType(_) => ErrorKind::MissingTypeInfo,
    }
  }
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// A recognized shape that is deliberately not handled.
  UnsupportedConstruct,
  /// The tree did not have a shape the rewrite relies on.
  InconsistentTree,
  /// The resolver could not give a type that was needed.
  MissingTypeInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Kind {
  /// What is unsupported, and the source text of the construct.
  Unsupported(Unsupported, String),
  Inconsistent(&'static str),
  /// The expression whose type was needed.
  MissingType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unsupported {
  FallbackWithChain,
  ChainInFallback,
  ManyDeclarators,
  CompoundAssign,
  ImpureTarget,
  ChainPosition,
  BareFallback,
  UsingOrConst,
  HostStmt,
  NonPureBefore,
  Conditional,
  Lambda,
  ManyTrailingComments,
  InitPosition,
  InitElement,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      Kind::Unsupported(u, text) => write!(f, "unsupported construct: {u}: `{text}`"),
      Kind::Inconsistent(s) => write!(f, "inconsistent tree: {s}"),
      Kind::MissingType(e) => write!(f, "missing type info for `{e}`"),
    }
  }
}

impl fmt::Display for Unsupported {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Unsupported::FallbackWithChain => "the right side of `??` contains a conditional access",
      Unsupported::ChainInFallback => "conditional access on the right side of `??`",
      Unsupported::ManyDeclarators => "more than one declarator",
      Unsupported::CompoundAssign => "compound assignment of a conditional access",
      Unsupported::ImpureTarget => "assignment target with side effects",
      Unsupported::ChainPosition => "conditional access in this position",
      Unsupported::BareFallback => "`??` as a statement",
      Unsupported::UsingOrConst => "`using` or `const` declaration",
      Unsupported::HostStmt => "cannot hoist out of this kind of statement",
      Unsupported::NonPureBefore => "expression with side effects evaluated before it",
      Unsupported::Conditional => "inside a conditionally evaluated operand",
      Unsupported::Lambda => "inside a lambda expression body",
      Unsupported::ManyTrailingComments => "more than one trailing comment",
      Unsupported::InitPosition => "initializer in this position",
      Unsupported::InitElement => "bare expression in an object initializer",
    };
    f.write_str(s)
  }
}

impl std::error::Error for Error {}
