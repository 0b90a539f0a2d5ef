//! Putting generated statements back into a tree.

use crate::emit::{self, Stmt, Style};
use crate::scope;
use crate::st::St;
use crate::util;
use csharp_syntax::ast::{AstNode as _, StmtContainer};
use csharp_syntax::kind::{SyntaxElement, SyntaxKind as SK, SyntaxNode};
use rowan::NodeOrToken;
use text_size::{TextRange, TextSize};

/// Replaces the statement `old` with `new`, laid out like the code around `old`. Returns the new
/// root.
///
/// An embedded statement, like the body of an `if` without braces, is replaced by a block. A
/// comment trailing `old` on its line is dropped with a warning, since it no longer belongs to one
/// statement.
pub(crate) fn replace_stmt(st: &mut St, old: &SyntaxNode, new: Vec<Stmt>) -> Result<SyntaxNode, crate::Error> {
  let in_container = old.parent().is_some_and(|p| StmtContainer::can_cast(p.kind()) || p.kind() == SK::Root);
  let new = if in_container || new.len() == 1 { new } else { vec![Stmt::Block(new)] };
  let (mut extra, dropped) = trailing_comments(old);
  if new.len() > 1 && !dropped.is_empty() {
    st.warn(old.text_range(), format!("dropped comment after split statement: {}", dropped.join(" ")));
  } else {
    extra = 0;
  }
  let indent = csharp_trivia::indentation_of(old);
  let eol = csharp_trivia::line_terminator_of(old);
  let scope = st.scope(old);
  let step = scope.step.clone();
  let style = Style { indent: &indent, step: &step, eol, allman: scope.allman };
  let text = emit::render(&new, style);
  splice(st, old, extra, &text)
}

/// Returns how many siblings after `node` are comments on its last line or the spaces before
/// them, and the text of those comments.
fn trailing_comments(node: &SyntaxNode) -> (usize, Vec<String>) {
  let mut count = 0usize;
  let mut ret = (0usize, Vec::new());
  for elem in std::iter::successors(node.next_sibling_or_token(), SyntaxElement::next_sibling_or_token) {
    let NodeOrToken::Token(tok) = elem else { break };
    if tok.text().contains('\n') {
      break;
    }
    count += 1;
    match tok.kind() {
      SK::Whitespace => {}
      SK::LineComment | SK::BlockComment => {
        ret.0 = count;
        ret.1.push(tok.text().to_owned());
      }
      _ => break,
    }
  }
  ret
}

/// Replaces `old` and `extra` siblings after it with the statements parsed from `text`.
fn splice(st: &mut St, old: &SyntaxNode, extra: usize, text: &str) -> Result<SyntaxNode, crate::Error> {
  let parent = old.parent().ok_or_else(|| util::inconsistent(old, "statement without a parent"))?;
  let lex = csharp_lex::get(text);
  let frag = csharp_parse::fragment(&lex.tokens);
  if !lex.errors.is_empty() || !frag.errors.is_empty() {
    log::error!("generated code did not parse:\n{text}");
    return Err(util::inconsistent(old, "generated code did not parse"));
  }
  let green = frag.list.syntax().green().into_owned();
  let children: Vec<_> = green
    .children()
    .map(|c| match c {
      NodeOrToken::Node(n) => NodeOrToken::Node(n.to_owned()),
      NodeOrToken::Token(t) => NodeOrToken::Token(t.to_owned()),
    })
    .collect();
  let mut end = old.text_range().end();
  let mut cur = old.next_sibling_or_token();
  for _ in 0..extra {
    let Some(elem) = cur else { break };
    end = elem.text_range().end();
    cur = elem.next_sibling_or_token();
  }
  st.edited(TextRange::new(old.text_range().start(), end), TextSize::of(text));
  let idx = old.index();
  st.spliced(&scope::path(&parent), idx, 1 + extra, children.len());
  let new_parent = parent.green().splice_children(idx..=idx + extra, children);
  Ok(SyntaxNode::new_root(parent.replace_with(new_parent)))
}
