//! Desugaring conditional access and object initializers into plain statements.
//!
//! Each pass takes a root and returns a new root, rewriting one construct at a time until none is
//! left. Trees are never changed in place: a rewrite renders new statements as text, parses them,
//! and splices them into a new tree that shares everything else with the old one.
//!
//! A pass either rewrites every construct it targets or fails as a whole.

mod chain;
mod cx;
mod emit;
mod error;
mod init;
mod scope;
mod splice;
mod st;
mod util;

pub use error::{Error, ErrorKind};

use csharp_syntax::kind::SyntaxNode;
use csharp_ty::Resolver;
use text_size::TextRange;

/// Options for the passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
  /// Whether to carry comments in object initializers over to the flattened statements.
  pub preserve_trivia: bool,
  /// Whether to drop namespace qualifiers from types the resolver gives.
  pub short_type_names: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self { preserve_trivia: true, short_type_names: false }
  }
}

/// The result of a pass.
#[derive(Debug)]
pub struct Desugar {
  /// The new root.
  pub root: SyntaxNode,
  /// How many constructs were rewritten.
  pub rewrites: usize,
  /// Things the pass did that the user may want to know about.
  pub warnings: Vec<Warning>,
}

/// Something a pass did that was not an error, like dropping a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
  range: TextRange,
  message: String,
}

impl Warning {
  /// The range, in the tree the pass was given.
  #[must_use]
  pub fn range(&self) -> TextRange {
    self.range
  }

  /// The message.
  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }
}

/// Rewrites every `?.`, `?[` and `??` on them into declarations and explicit null checks.
///
/// # Errors
///
/// If a chain is in a position that cannot be rewritten, or a needed type is unknown.
pub fn optional_chain(root: &SyntaxNode, resolver: &dyn Resolver, options: &Options) -> Result<Desugar, Error> {
  let cx = cx::Cx { resolver, options };
  let mut st = st::St::default();
  let root = chain::get(&mut st, cx, root.clone()).map_err(|mut e| {
    e.range = st.original(e.range);
    e
  })?;
  let (rewrites, warnings) = st.finish();
  Ok(Desugar { root, rewrites, warnings })
}

/// Rewrites every typed construction with an object initializer into the construction followed by
/// one statement per entry.
///
/// # Errors
///
/// If a construction is in a position that cannot be rewritten, or has comments that cannot be
/// kept.
pub fn initializer(root: &SyntaxNode, resolver: &dyn Resolver, options: &Options) -> Result<Desugar, Error> {
  let cx = cx::Cx { resolver, options };
  let mut st = st::St::default();
  let root = init::get(&mut st, cx, root.clone()).map_err(|mut e| {
    e.range = st.original(e.range);
    e
  })?;
  let (rewrites, warnings) = st.finish();
  Ok(Desugar { root, rewrites, warnings })
}
