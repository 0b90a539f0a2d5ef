//! Running the desugaring passes over one document.
//!
//! The passes run in a fixed order over the tree of the document. A disabled pass is skipped. A
//! failing pass fails the whole document, and no output is produced for it.

mod location;

pub use csharp_desugar::ErrorKind;
pub use location::{LineIndex, Location};

use csharp_syntax::ast::AstNode as _;
use csharp_syntax::kind::SyntaxNode;
use csharp_ty::Resolver;
use std::fmt;
use text_size::TextRange;

/// What to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Whether to rewrite `?.`, `?[` and `??`.
  pub optional_chain: bool,
  /// Whether to flatten object initializers.
  pub initializer: bool,
  /// Whether to keep comments found in object initializers.
  pub preserve_trivia: bool,
  /// Whether to write resolved types without namespaces.
  pub short_type_names: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self { optional_chain: true, initializer: true, preserve_trivia: true, short_type_names: false }
  }
}

impl Config {
  /// Whether the pass should run.
  #[must_use]
  pub fn enabled(&self, pass: Pass) -> bool {
    match pass {
      Pass::OptionalChain => self.optional_chain,
      Pass::Initializer => self.initializer,
    }
  }
}

/// A pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
  /// Rewrites conditional access.
  OptionalChain,
  /// Flattens object initializers.
  Initializer,
}

impl Pass {
  /// All the passes, in the order they run.
  pub const ALL: [Pass; 2] = [Pass::OptionalChain, Pass::Initializer];

  /// The stable name.
  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Pass::OptionalChain => "optional-chain",
      Pass::Initializer => "initializer",
    }
  }

  fn run(self, root: &SyntaxNode, resolver: &dyn Resolver, options: &csharp_desugar::Options) -> PassResult {
    match self {
      Pass::OptionalChain => csharp_desugar::optional_chain(root, resolver, options),
      Pass::Initializer => csharp_desugar::initializer(root, resolver, options),
    }
  }
}

type PassResult = Result<csharp_desugar::Desugar, csharp_desugar::Error>;

impl fmt::Display for Pass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// How much an event matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  /// Progress.
  Info,
  /// Something the user may want to fix or know about.
  Warning,
}

/// Something that happened while running the passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
  /// How much it matters.
  pub severity: Severity,
  /// The pass it happened in.
  pub pass: Option<Pass>,
  /// What happened.
  pub message: String,
  /// Where, in the text the pass was given.
  pub at: Option<Location>,
}

/// Receives events.
pub trait Sink {
  /// Receives one event.
  fn event(&mut self, event: Event);
}

/// A sink that keeps every event.
#[derive(Debug, Default)]
pub struct VecSink {
  /// The events, in order.
  pub events: Vec<Event>,
}

impl Sink for VecSink {
  fn event(&mut self, event: Event) {
    self.events.push(event);
  }
}

/// The result of running the passes.
#[derive(Debug)]
pub struct Output {
  /// The new text.
  pub text: String,
  /// The new tree.
  pub root: SyntaxNode,
  /// Whether any pass rewrote anything.
  pub changed: bool,
}

/// An error that stopped a document from being processed.
#[derive(Debug)]
pub enum Error {
  /// The document did not lex or parse.
  Syntax {
    /// Where.
    at: Location,
    /// What was wrong.
    message: String,
  },
  /// A pass failed.
  Pass {
    /// The pass.
    pass: Pass,
    /// Where, in the text the pass was given.
    at: Location,
    /// The error.
    error: csharp_desugar::Error,
  },
}

impl Error {
  /// Where the error is.
  #[must_use]
  pub fn location(&self) -> &Location {
    match self {
      Error::Syntax { at, .. } | Error::Pass { at, .. } => at,
    }
  }

  /// The category, if a pass failed.
  #[must_use]
  pub fn kind(&self) -> Option<ErrorKind> {
    match self {
      Error::Syntax { .. } => None,
      Error::Pass { error, .. } => Some(error.kind()),
    }
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::Syntax { at, message } => write!(f, "{at}: syntax error: {message}"),
      Error::Pass { pass, at, error } => write!(f, "{at}: {pass}: {error}"),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::Syntax { .. } => None,
      Error::Pass { error, .. } => Some(error),
    }
  }
}

/// Parses `text` and runs the enabled passes over it.
///
/// # Errors
///
/// If the text does not lex or parse, or a pass fails.
pub fn run(text: &str, resolver: &dyn Resolver, config: &Config, sink: &mut dyn Sink) -> Result<Output, Error> {
  let lex = csharp_lex::get(text);
  if let Some(e) = lex.errors.first() {
    let at = LineIndex::new(text).location(text, TextRange::empty(e.offset()));
    return Err(Error::Syntax { at, message: e.to_string() });
  }
  let parse = csharp_parse::get(&lex.tokens);
  if let Some(e) = parse.errors.first() {
    let at = LineIndex::new(text).location(text, e.range());
    return Err(Error::Syntax { at, message: e.to_string() });
  }
  let options =
    csharp_desugar::Options { preserve_trivia: config.preserve_trivia, short_type_names: config.short_type_names };
  let mut root = parse.root.syntax().clone();
  let mut changed = false;
  for pass in Pass::ALL {
    if !config.enabled(pass) {
      log::info!("skip: {pass}");
      continue;
    }
    log::info!("start: {pass}");
    sink.event(info(pass, "start".to_owned()));
    let done = pass.run(&root, resolver, &options).map_err(|error| {
      let input = root.to_string();
      let at = LineIndex::new(&input).location(&input, error.range());
      log::info!("fail: {pass}: {error}");
      Error::Pass { pass, at, error }
    })?;
    if !done.warnings.is_empty() {
      let input = root.to_string();
      let index = LineIndex::new(&input);
      for w in done.warnings {
        let at = Some(index.location(&input, w.range()));
        sink.event(Event { severity: Severity::Warning, pass: Some(pass), message: w.message().to_owned(), at });
      }
    }
    log::info!("finish: {pass}: {} rewrites", done.rewrites);
    sink.event(info(pass, format!("finish: {} rewrites", done.rewrites)));
    changed |= done.rewrites != 0;
    root = done.root;
  }
  Ok(Output { text: root.to_string(), root, changed })
}

fn info(pass: Pass, message: String) -> Event {
  Event { severity: Severity::Info, pass: Some(pass), message, at: None }
}
