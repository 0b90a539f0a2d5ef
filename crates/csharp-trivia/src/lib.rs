//! Reading and re-creating the formatting around nodes: indentation, line terminators, and comments.
//!
//! Nothing here mutates a tree. Rewrites read trivia off the original nodes with these functions
//! and render it again around the text they generate.


use csharp_syntax::kind::{SyntaxKind as SK, SyntaxNode, SyntaxToken};

/// The indentation step used when none can be derived from the source.
pub const DEFAULT_STEP: &str = "    ";

/// The formatting attached to one node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trivia {
  /// The whitespace at the start of the node's line.
  pub indent: String,
  /// Comment lines directly above the node. Blank lines among them are empty strings.
  pub leading: Vec<String>,
  /// Comments after the node on its last line.
  pub trailing: Vec<String>,
  /// The line terminator ending the node's last line.
  pub eol: &'static str,
}

impl Trivia {
  /// Gathers the trivia of `node`.
  #[must_use]
  pub fn of(node: &SyntaxNode) -> Self {
    Self {
      indent: indentation_of(node),
      leading: leading_comments(node),
      trailing: trailing_comments(node),
      eol: line_terminator_of(node),
    }
  }
}

/// The line terminator for the platform, used when a document has none to copy.
#[must_use]
pub fn platform_eol() -> &'static str {
  if cfg!(windows) { "\r\n" } else { "\n" }
}

/// Returns the leading whitespace of the line `node` starts on.
#[must_use]
pub fn indentation_of(node: &SyntaxNode) -> String {
  node.first_token().map(|tok| line_indent(&tok)).unwrap_or_default()
}

/// Returns the leading whitespace of the line `tok` is on.
#[must_use]
pub fn line_indent(tok: &SyntaxToken) -> String {
  let mut prefix = String::new();
  let mut cur = tok.prev_token();
  while let Some(t) = cur {
    let text = t.text();
    if let Some(idx) = text.rfind('\n') {
      prefix.insert_str(0, &text[idx + 1..]);
      break;
    }
    prefix.insert_str(0, text);
    cur = t.prev_token();
  }
  prefix.chars().take_while(|c| matches!(c, ' ' | '\t')).collect()
}

/// Returns the extra indentation of `inner` relative to `outer`, if `inner` is indented further.
#[must_use]
pub fn indentation_delta(outer: &SyntaxNode, inner: &SyntaxNode) -> Option<String> {
  let outer = indentation_of(outer);
  let inner = indentation_of(inner);
  inner.strip_prefix(outer.as_str()).filter(|d| !d.is_empty()).map(ToOwned::to_owned)
}

/// Returns the indentation step used by the blocks under `scope`, or the default.
#[must_use]
pub fn indentation_step(scope: &SyntaxNode) -> String {
  scope
    .descendants()
    .filter(|n| n.kind() == SK::Block)
    .find_map(|block| {
      let stmt = block.children().next()?;
      if !starts_line(&stmt) {
        return None;
      }
      indentation_delta(&block, &stmt)
    })
    .unwrap_or_else(|| DEFAULT_STEP.to_owned())
}

/// Whether `node` is the first thing on its line.
#[must_use]
pub fn starts_line(node: &SyntaxNode) -> bool {
  let Some(tok) = node.first_token() else { return false };
  let mut cur = tok.prev_token();
  while let Some(t) = cur {
    match t.kind() {
      SK::Whitespace if t.text().contains('\n') => return true,
      SK::Whitespace => cur = t.prev_token(),
      _ => return false,
    }
  }
  true
}

/// Returns the terminator ending the line `node` ends on. Falls back to terminators elsewhere in
/// the document, then to the platform's.
#[must_use]
pub fn line_terminator_of(node: &SyntaxNode) -> &'static str {
  let after = node.last_token().and_then(|tok| {
    std::iter::successors(tok.next_token(), SyntaxToken::next_token).find_map(|t| terminator(&t))
  });
  let before = || {
    let tok = node.first_token()?;
    std::iter::successors(tok.prev_token(), SyntaxToken::prev_token).find_map(|t| terminator(&t))
  };
  after.or_else(before).unwrap_or_else(platform_eol)
}

fn terminator(tok: &SyntaxToken) -> Option<&'static str> {
  let idx = tok.text().find('\n')?;
  Some(if tok.text()[..idx].ends_with('\r') { "\r\n" } else { "\n" })
}

/// Replaces the indentation `from` with `to` on every line of `text`. Lines not starting with
/// `from` lose all their indentation and get `to`.
#[must_use]
pub fn shift_indentation(text: &str, from: &str, to: &str) -> String {
  let mut ret = String::with_capacity(text.len());
  for (idx, line) in text.split('\n').enumerate() {
    if idx != 0 {
      ret.push('\n');
    }
    if line.trim().is_empty() {
      ret.push_str(line.trim_start_matches([' ', '\t']));
      continue;
    }
    let rest = line.strip_prefix(from).unwrap_or_else(|| line.trim_start_matches([' ', '\t']));
    ret.push_str(to);
    ret.push_str(rest);
  }
  ret
}

/// Returns the comments on their own lines directly above `node`, in order, with blank lines
/// between them as empty strings. Comments trailing code on the line above are not included.
#[must_use]
pub fn leading_comments(node: &SyntaxNode) -> Vec<String> {
  let Some(first) = node.first_token() else { return Vec::new() };
  let before: Vec<SyntaxToken> =
    std::iter::successors(first.prev_token(), SyntaxToken::prev_token)
      .take_while(|t| t.kind().is_trivia())
      .collect();
  let mut ret = Vec::new();
  let mut line_has_code = before.last().is_none_or(|t| t.prev_token().is_some());
  let mut pending_blank = 0usize;
  for tok in before.iter().rev() {
    match tok.kind() {
      SK::Whitespace => {
        let newlines = tok.text().matches('\n').count();
        if newlines > 0 {
          pending_blank += newlines - 1;
          line_has_code = false;
        }
      }
      _ if line_has_code => {}
      _ => {
        if !ret.is_empty() {
          ret.extend(std::iter::repeat_n(String::new(), pending_blank));
        }
        pending_blank = 0;
        ret.push(tok.text().to_owned());
        line_has_code = true;
      }
    }
  }
  ret
}

/// Returns the comments after `node` on the same line.
#[must_use]
pub fn trailing_comments(node: &SyntaxNode) -> Vec<String> {
  let Some(last) = node.last_token() else { return Vec::new() };
  std::iter::successors(last.next_token(), SyntaxToken::next_token)
    .take_while(|t| t.kind().is_trivia() && !t.text().contains('\n'))
    .filter(|t| t.kind().is_comment())
    .map(|t| t.text().to_owned())
    .collect()
}

/// Renders comments as whole lines, each starting with `prefix` and ending with `eol`. Blank
/// entries become empty lines.
#[must_use]
pub fn extract_trailing_comments(comments: &[String], prefix: &str, eol: &str) -> String {
  let mut ret = String::new();
  for c in comments {
    if !c.is_empty() {
      ret.push_str(prefix);
      ret.push_str(c);
    }
    ret.push_str(eol);
  }
  ret
}
