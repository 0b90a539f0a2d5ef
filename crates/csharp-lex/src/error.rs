use std::fmt;
use text_size::TextSize;

/// A lex error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  pub(crate) idx: usize,
  pub(crate) kind: Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
  UnclosedComment,
  UnclosedString,
  UnclosedChar,
  InvalidBytes,
  NeedDigits,
}

impl Error {
  /// Returns the byte offset of the error.
  #[must_use]
  pub fn offset(&self) -> TextSize {
    TextSize::try_from(self.idx).unwrap_or(TextSize::from(u32::MAX))
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      Kind::UnclosedComment => f.write_str("unclosed comment"),
      Kind::UnclosedString => f.write_str("unclosed string literal"),
      Kind::UnclosedChar => f.write_str("unclosed character literal"),
      Kind::InvalidBytes => f.write_str("invalid bytes"),
      Kind::NeedDigits => f.write_str("need at least one digit"),
    }
  }
}

impl std::error::Error for Error {}
