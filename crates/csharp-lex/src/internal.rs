//! The internal impl.

use crate::error::Kind;
use crate::st::St;
use csharp_syntax::kind::SyntaxKind as SK;

pub(crate) fn token(st: &mut St<'_>, b: u8) -> SK {
  if is_ws(b) {
    st.bump();
    st.bump_while(is_ws);
    return SK::Whitespace;
  }
  if b == b'#' {
    st.bump();
    st.bump_while(|b| !is_eol(b));
    return SK::Directive;
  }
  if b == b'/' {
    match st.peek(1) {
      Some(b'/') => {
        st.bump();
        st.bump();
        st.bump_while(|b| !is_eol(b));
        return SK::LineComment;
      }
      Some(b'*') => {
        st.bump();
        st.bump();
        block_comment(st);
        return SK::BlockComment;
      }
      _ => {}
    }
  }
  if let Some(kind) = string_like(st, b) {
    return kind;
  }
  if b == b'.' && st.peek(1).is_some_and(|b| b.is_ascii_digit()) {
    number(st);
    return SK::Number;
  }
  if let Some(&(_, sk)) = SK::PUNCTUATION.iter().find(|&(bs, _)| st.eat_prefix(bs)) {
    return sk;
  }
  if is_ident_start(b) {
    let start = st.mark();
    st.bump();
    st.bump_while(is_ident_continue);
    return SK::keyword(st.non_empty_since(start).as_bytes()).unwrap_or(SK::Id);
  }
  if b.is_ascii_digit() {
    number(st);
    return SK::Number;
  }
  st.err(Kind::InvalidBytes);
  st.next_str();
  SK::Invalid
}

/// Strings, chars and `@`-prefixed identifiers.
fn string_like(st: &mut St<'_>, b: u8) -> Option<SK> {
  match (b, st.peek(1), st.peek(2)) {
    (b'"', _, _) => {
      st.bump();
      regular_string(st);
    }
    (b'\'', _, _) => {
      st.bump();
      char_lit(st);
      return Some(SK::Char);
    }
    (b'@', Some(b'"'), _) => {
      st.bump();
      st.bump();
      verbatim_string(st);
    }
    (b'$', Some(b'"'), _) => {
      st.bump();
      st.bump();
      interpolated(st, false);
    }
    (b'$', Some(b'@'), Some(b'"')) | (b'@', Some(b'$'), Some(b'"')) => {
      st.bump();
      st.bump();
      st.bump();
      interpolated(st, true);
    }
    (b'@', Some(c), _) if is_ident_start(c) => {
      st.bump();
      st.bump();
      st.bump_while(is_ident_continue);
      return Some(SK::Id);
    }
    _ => return None,
  }
  Some(SK::String)
}

fn block_comment(st: &mut St<'_>) {
  while let Some(b) = st.cur() {
    st.bump();
    if b == b'*' && st.cur() == Some(b'/') {
      st.bump();
      return;
    }
  }
  st.err(Kind::UnclosedComment);
}

/// After the opening `"`.
fn regular_string(st: &mut St<'_>) {
  while let Some(b) = st.cur() {
    match b {
      b'"' => {
        st.bump();
        return;
      }
      b'\\' => {
        st.bump();
        if st.cur().is_some_and(|b| !is_eol(b)) {
          st.bump();
        }
      }
      b'\n' | b'\r' => break,
      _ => st.bump(),
    }
  }
  st.err(Kind::UnclosedString);
}

/// After the opening `@"`. Quotes are escaped by doubling.
fn verbatim_string(st: &mut St<'_>) {
  while let Some(b) = st.cur() {
    st.bump();
    if b == b'"' {
      if st.cur() == Some(b'"') {
        st.bump();
      } else {
        return;
      }
    }
  }
  st.err(Kind::UnclosedString);
}

/// After the opening `'`.
fn char_lit(st: &mut St<'_>) {
  while let Some(b) = st.cur() {
    match b {
      b'\'' => {
        st.bump();
        return;
      }
      b'\\' => {
        st.bump();
        if st.cur().is_some_and(|b| !is_eol(b)) {
          st.bump();
        }
      }
      b'\n' | b'\r' => break,
      _ => st.bump(),
    }
  }
  st.err(Kind::UnclosedChar);
}

/// After the opening `$"` or `$@"`. Holes are skipped with brace matching; the whole literal is
/// one opaque token.
fn interpolated(st: &mut St<'_>, verbatim: bool) {
  let mut depth = 0usize;
  while let Some(b) = st.cur() {
    if depth == 0 {
      match b {
        b'"' if verbatim && st.peek(1) == Some(b'"') => {
          st.bump();
          st.bump();
        }
        b'"' => {
          st.bump();
          return;
        }
        b'\\' if !verbatim => {
          st.bump();
          if st.cur().is_some() {
            st.bump();
          }
        }
        b'{' if st.peek(1) == Some(b'{') => {
          st.bump();
          st.bump();
        }
        b'{' => {
          depth += 1;
          st.bump();
        }
        b'\n' | b'\r' if !verbatim => break,
        _ => st.bump(),
      }
    } else {
      match b {
        b'{' => {
          depth += 1;
          st.bump();
        }
        b'}' => {
          depth -= 1;
          st.bump();
        }
        b'"' => {
          st.bump();
          regular_string(st);
        }
        b'\'' => {
          st.bump();
          char_lit(st);
        }
        _ => st.bump(),
      }
    }
  }
  st.err(Kind::UnclosedString);
}

fn number(st: &mut St<'_>) {
  if st.eat_prefix(b"0x") || st.eat_prefix(b"0X") {
    digits(st, |b| b.is_ascii_hexdigit() || b == b'_');
  } else if st.eat_prefix(b"0b") || st.eat_prefix(b"0B") {
    digits(st, |b| matches!(b, b'0' | b'1' | b'_'));
  } else {
    st.bump_while(is_dec);
    if st.cur() == Some(b'.') && st.peek(1).is_some_and(|b| b.is_ascii_digit()) {
      st.bump();
      st.bump_while(is_dec);
    }
    if let Some(b'e' | b'E') = st.cur() {
      st.bump();
      if let Some(b'-' | b'+') = st.cur() {
        st.bump();
      }
      digits(st, is_dec);
    }
  }
  st.bump_while(|b| matches!(b, b'u' | b'U' | b'l' | b'L' | b'f' | b'F' | b'd' | b'D' | b'm' | b'M'));
}

fn digits(st: &mut St<'_>, f: fn(u8) -> bool) {
  let m = st.mark();
  st.bump_while(f);
  if !st.did_bump_since(m) {
    st.err(Kind::NeedDigits);
  }
}

fn is_dec(b: u8) -> bool {
  b.is_ascii_digit() || b == b'_'
}

fn is_ident_start(b: u8) -> bool {
  b.is_ascii_alphabetic() || b == b'_' || !b.is_ascii()
}

fn is_ident_continue(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}

fn is_eol(b: u8) -> bool {
  matches!(b, b'\n' | b'\r')
}

fn is_ws(b: u8) -> bool {
  matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}
