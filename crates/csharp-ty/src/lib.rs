//! The type information the rewrites consume.
//!
//! Types are never inferred here. A [`Resolver`] answers questions about expressions the way a
//! compiler's semantic model would, and [`Table`] is a resolver backed by plain data.

pub mod table;


pub use table::Table;

use std::fmt;

/// A type, as the resolver displays it. May be fully qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(String);

impl TypeName {
  /// Wraps a display string.
  pub fn new<S: Into<String>>(s: S) -> Self {
    Self(s.into())
  }

  /// Returns the display string.
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns this type with namespace qualifiers dropped from every path, including inside type
  /// arguments. `System.Collections.Generic.List<System.String>` becomes `List<String>`.
  #[must_use]
  pub fn short(&self) -> TypeName {
    let mut ret = String::with_capacity(self.0.len());
    let mut segment = String::new();
    for c in self.0.chars() {
      match c {
        '.' | ':' => segment.clear(),
        c if c.is_alphanumeric() || c == '_' || c == '@' => segment.push(c),
        c => {
          ret.push_str(&segment);
          segment.clear();
          ret.push(c);
        }
      }
    }
    ret.push_str(&segment);
    TypeName(ret)
  }
}

impl fmt::Display for TypeName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Answers type questions about the document being rewritten.
///
/// Expressions and callees are passed as source text. Implementations should treat texts that
/// differ only in trivia as the same; [`normalize`] does that.
pub trait Resolver {
  /// Returns the static type of the expression.
  fn static_type_of(&self, expr: &str) -> Option<TypeName>;

  /// Returns the name of the parameter that the argument at `position` of a call to `callee`
  /// binds to.
  fn matched_parameter_name(&self, callee: &str, position: usize) -> Option<String>;

  /// Returns a literal for the default value of the type.
  fn default_value_literal(&self, ty: &TypeName) -> String {
    format!("default({ty})")
  }
}

impl<R: Resolver + ?Sized> Resolver for &R {
  fn static_type_of(&self, expr: &str) -> Option<TypeName> {
    (**self).static_type_of(expr)
  }

  fn matched_parameter_name(&self, callee: &str, position: usize) -> Option<String> {
    (**self).matched_parameter_name(callee, position)
  }

  fn default_value_literal(&self, ty: &TypeName) -> String {
    (**self).default_value_literal(ty)
  }
}

/// Returns the text with all trivia removed, keeping one space only where two words would
/// otherwise merge.
#[must_use]
pub fn normalize(text: &str) -> String {
  let lex = csharp_lex::get(text);
  let mut ret = String::with_capacity(text.len());
  for tok in lex.tokens.iter().filter(|t| !t.kind.is_trivia()) {
    let word = |c: char| c.is_alphanumeric() || c == '_' || c == '@';
    if ret.ends_with(word) && tok.text.starts_with(word) {
      ret.push(' ');
    }
    ret.push_str(tok.text);
  }
  ret
}
