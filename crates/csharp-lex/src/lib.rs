//! Lexing a string into a sequence of tokens.
//!
//! Every byte of the input ends up in exactly one token, trivia included, so the tokens can be
//! reassembled into the original text.

mod error;
mod internal;
mod st;

#[cfg(test)]
mod tests;

use csharp_syntax::kind::SyntaxKind as SK;
use st::St;

pub use error::Error;

/// A token: a kind and the text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  /// The kind.
  pub kind: SK,
  /// The text.
  pub text: &'a str,
}

/// The output of lexing.
#[derive(Debug, Default)]
pub struct Lex<'a> {
  /// The tokens, trivia included.
  pub tokens: Vec<Token<'a>>,
  /// Errors encountered. Lexing always continues past them.
  pub errors: Vec<Error>,
}

/// Lexes the whole string.
#[must_use]
pub fn get(s: &str) -> Lex<'_> {
  let mut ret = Lex::default();
  let mut st = St::new(s);
  while let Some(b) = st.cur() {
    let start = st.mark();
    let kind = internal::token(&mut st, b);
    let text = st.non_empty_since(start);
    ret.tokens.push(Token { kind, text });
  }
  ret.errors = st.finish();
  ret
}
