//! The event-recording parser and the sink that turns events into a tree.
//!
//! The grammar never sees trivia. The sink puts it back: trivia before a node goes in front of that
//! node, so a node's range starts at its first real token, and trivia after a node's last token
//! goes to whatever node is open when the next token or node comes along.

use crate::{Error, ErrorKind, Expected};
use csharp_lex::Token;
use csharp_syntax::kind::{SyntaxKind as SK, SyntaxNode};
use drop_bomb::DebugDropBomb;
use rowan::GreenNodeBuilder;
use text_size::{TextRange, TextSize};

#[derive(Debug)]
enum Event {
  Enter(SK, Option<usize>),
  Token,
  Exit,
  Error(ErrorKind),
}

pub(crate) struct Parser<'a> {
  tokens: &'a [Token<'a>],
  idx: usize,
  events: Vec<Option<Event>>,
}

/// A node that has been entered but not yet exited.
pub(crate) struct Entered {
  bomb: DebugDropBomb,
  idx: usize,
}

/// A node that has been exited.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Exited {
  idx: usize,
}

impl<'a> Parser<'a> {
  pub(crate) fn new(tokens: &'a [Token<'a>]) -> Self {
    Self { tokens, idx: 0, events: Vec::new() }
  }

  fn non_trivia(&self) -> impl Iterator<Item = &'a Token<'a>> + use<'a> {
    let tokens: &'a [Token<'a>] = self.tokens;
    tokens[self.idx..].iter().filter(|t| !t.kind.is_trivia())
  }

  pub(crate) fn peek(&self) -> Option<&'a Token<'a>> {
    self.non_trivia().next()
  }

  /// The kind of the `n`th non-trivia token from here, 0 being the current one.
  pub(crate) fn nth(&self, n: usize) -> Option<SK> {
    self.non_trivia().nth(n).map(|t| t.kind)
  }

  /// Whether the `n`th token from here is the identifier `text`.
  pub(crate) fn nth_is_word(&self, n: usize, text: &str) -> bool {
    self.non_trivia().nth(n).is_some_and(|t| t.kind == SK::Id && t.text == text)
  }

  pub(crate) fn at(&self, kind: SK) -> bool {
    self.nth(0) == Some(kind)
  }

  pub(crate) fn at_word(&self, text: &str) -> bool {
    self.nth_is_word(0, text)
  }

  pub(crate) fn enter(&mut self) -> Entered {
    let idx = self.events.len();
    self.events.push(Some(Event::Enter(SK::Error, None)));
    Entered { bomb: DebugDropBomb::new("must be passed to exit or abandon"), idx }
  }

  pub(crate) fn exit(&mut self, mut en: Entered, kind: SK) -> Exited {
    en.bomb.defuse();
    let parent = match self.events[en.idx] {
      Some(Event::Enter(_, parent)) => parent,
      _ => None,
    };
    self.events[en.idx] = Some(Event::Enter(kind, parent));
    self.events.push(Some(Event::Exit));
    Exited { idx: en.idx }
  }

  pub(crate) fn abandon(&mut self, mut en: Entered) {
    en.bomb.defuse();
    self.events[en.idx] = None;
  }

  /// Starts a node that will contain the already-exited `ex`.
  pub(crate) fn precede(&mut self, ex: Exited) -> Entered {
    let en = self.enter();
    if let Some(Event::Enter(_, parent)) = &mut self.events[ex.idx] {
      *parent = Some(en.idx);
    }
    en
  }

  /// Consumes the current non-trivia token. Does nothing at the end.
  pub(crate) fn bump(&mut self) {
    while let Some(tok) = self.tokens.get(self.idx) {
      self.idx += 1;
      if !tok.kind.is_trivia() {
        self.events.push(Some(Event::Token));
        return;
      }
    }
  }

  /// Bumps if at `kind`, else reports that it was expected.
  pub(crate) fn eat(&mut self, kind: SK) -> bool {
    if self.at(kind) {
      self.bump();
      true
    } else {
      self.error(ErrorKind::Expected(Expected::Kind(kind)));
      false
    }
  }

  /// Reports an error without consuming anything.
  pub(crate) fn error(&mut self, kind: ErrorKind) {
    self.events.push(Some(Event::Error(kind)));
  }

  /// Reports an error and wraps the current token in an error node, so loops always progress.
  pub(crate) fn error_bump(&mut self, kind: ErrorKind) {
    self.error(kind);
    let en = self.enter();
    self.bump();
    self.exit(en, SK::Error);
  }

  pub(crate) fn finish(self) -> (SyntaxNode, Vec<Error>) {
    let mut sink = Sink {
      tokens: self.tokens,
      idx: 0,
      offset: TextSize::from(0),
      depth: 0,
      builder: GreenNodeBuilder::new(),
      errors: Vec::new(),
    };
    let mut events = self.events;
    for idx in 0..events.len() {
      match events[idx].take() {
        Some(Event::Enter(kind, mut parent)) => {
          let mut kinds = vec![kind];
          while let Some(p) = parent {
            parent = match events[p].take() {
              Some(Event::Enter(kind, grandparent)) => {
                kinds.push(kind);
                grandparent
              }
              _ => None,
            };
          }
          for kind in kinds.into_iter().rev() {
            sink.enter(kind);
          }
        }
        Some(Event::Token) => sink.token(),
        Some(Event::Exit) => sink.exit(),
        Some(Event::Error(kind)) => sink.error(kind),
        None => {}
      }
    }
    (SyntaxNode::new_root(sink.builder.finish()), sink.errors)
  }
}

struct Sink<'a> {
  tokens: &'a [Token<'a>],
  idx: usize,
  offset: TextSize,
  depth: usize,
  builder: GreenNodeBuilder<'static>,
  errors: Vec<Error>,
}

impl Sink<'_> {
  fn enter(&mut self, kind: SK) {
    if self.depth > 0 {
      self.trivia();
    }
    self.depth += 1;
    self.builder.start_node(kind.into());
  }

  fn exit(&mut self) {
    self.depth -= 1;
    if self.depth == 0 {
      self.trivia();
    }
    self.builder.finish_node();
  }

  fn token(&mut self) {
    self.trivia();
    if let Some(tok) = self.tokens.get(self.idx) {
      self.push(*tok);
    }
  }

  fn trivia(&mut self) {
    while let Some(&tok) = self.tokens.get(self.idx) {
      if !tok.kind.is_trivia() {
        break;
      }
      self.push(tok);
    }
  }

  fn push(&mut self, tok: Token<'_>) {
    self.builder.token(tok.kind.into(), tok.text);
    self.idx += 1;
    self.offset += TextSize::of(tok.text);
  }

  fn error(&mut self, kind: ErrorKind) {
    let mut start = self.offset;
    let mut len = TextSize::from(0);
    for tok in &self.tokens[self.idx..] {
      if tok.kind.is_trivia() {
        start += TextSize::of(tok.text);
      } else {
        len = TextSize::of(tok.text);
        break;
      }
    }
    self.errors.push(Error { range: TextRange::at(start, len), kind });
  }
}
