//! A resolver backed by an in-memory table.
//!
//! The text form has one entry per line:
//!
//! ```text
//! # comment
//! type a.B() : Foo.Bar
//! params M : first, second
//! ```

use crate::{Resolver, TypeName, normalize};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// Static types of expressions and parameter names of callees.
#[derive(Debug, Default, Clone)]
pub struct Table {
  types: FxHashMap<String, TypeName>,
  params: FxHashMap<String, Vec<String>>,
}

impl Table {
  /// Records the static type of an expression.
  pub fn insert_type(&mut self, expr: &str, ty: TypeName) {
    self.types.insert(normalize(expr), ty);
  }

  /// Records the parameter names of a callee, in order.
  pub fn insert_params<I, S>(&mut self, callee: &str, names: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.params.insert(normalize(callee), names.into_iter().map(Into::into).collect());
  }

  /// Returns the number of entries.
  #[must_use]
  pub fn len(&self) -> usize {
    self.types.len() + self.params.len()
  }

  /// Returns whether there are no entries.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Resolver for Table {
  fn static_type_of(&self, expr: &str) -> Option<TypeName> {
    self.types.get(&normalize(expr)).cloned()
  }

  fn matched_parameter_name(&self, callee: &str, position: usize) -> Option<String> {
    let callee = normalize(callee);
    let names = self.params.get(&callee).or_else(|| self.params.get(final_member(&callee)))?;
    names.get(position).cloned()
  }
}

/// The last member name of a callee: `M` for `a.b.M` and for `a.M<T>`.
fn final_member(callee: &str) -> &str {
  let callee = callee.split('<').next().unwrap_or(callee);
  callee.rsplit('.').next().unwrap_or(callee)
}

impl FromStr for Table {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut ret = Table::default();
    for (idx, line) in s.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }
      let err = |kind: Kind| Error { line: idx + 1, kind };
      let (directive, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
      let (key, val) = rest.rsplit_once(" : ").ok_or_else(|| err(Kind::MissingColon))?;
      let (key, val) = (key.trim(), val.trim());
      if key.is_empty() {
        return Err(err(Kind::EmptyKey));
      }
      match directive {
        "type" => {
          if val.is_empty() {
            return Err(err(Kind::EmptyType));
          }
          ret.insert_type(key, TypeName::new(val));
        }
        "params" => {
          let names: Vec<&str> = val.split(',').map(str::trim).collect();
          if names.iter().any(|n| n.is_empty()) {
            return Err(err(Kind::EmptyParam));
          }
          ret.insert_params(key, names);
        }
        _ => return Err(err(Kind::UnknownDirective(directive.to_owned()))),
      }
    }
    Ok(ret)
  }
}

/// An error in the text form of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  line: usize,
  kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
  UnknownDirective(String),
  MissingColon,
  EmptyKey,
  EmptyType,
  EmptyParam,
}

impl Error {
  /// The 1-based line number.
  #[must_use]
  pub fn line(&self) -> usize {
    self.line
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}: ", self.line)?;
    match &self.kind {
      Kind::UnknownDirective(d) => write!(f, "unknown directive `{d}`, expected `type` or `params`"),
      Kind::MissingColon => f.write_str("missing ` : ` separator"),
      Kind::EmptyKey => f.write_str("empty expression or callee"),
      Kind::EmptyType => f.write_str("empty type"),
      Kind::EmptyParam => f.write_str("empty parameter name"),
    }
  }
}

impl std::error::Error for Error {}
