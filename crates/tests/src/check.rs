//! Helpers to run the passes over a document and check what comes out.

use csharp_pipeline::{Config, Error, ErrorKind, Event, Output, Severity, VecSink};
use csharp_ty::{Table, TypeName};

/// A document with the type information to rewrite it with.
#[derive(Debug, Default)]
pub(crate) struct Input {
  text: String,
  table: Table,
  config: Config,
}

impl Input {
  pub(crate) fn new(text: &str) -> Self {
    Self { text: text.to_owned(), ..Self::default() }
  }

  /// Records the static type of `expr`.
  pub(crate) fn ty(mut self, expr: &str, ty: &str) -> Self {
    self.table.insert_type(expr, TypeName::new(ty));
    self
  }

  /// Records the parameter names of `callee`.
  pub(crate) fn params(mut self, callee: &str, names: &[&str]) -> Self {
    self.table.insert_params(callee, names.iter().copied());
    self
  }

  pub(crate) fn config(mut self, f: impl FnOnce(&mut Config)) -> Self {
    f(&mut self.config);
    self
  }

  pub(crate) fn run(&self) -> (Result<Output, Error>, Vec<Event>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut sink = VecSink::default();
    let ret = csharp_pipeline::run(&self.text, &self.table, &self.config, &mut sink);
    (ret, sink.events)
  }

  /// Checks that the document is rewritten to `want`, and returns the events.
  #[track_caller]
  pub(crate) fn check(&self, want: &str) -> Vec<Event> {
    let (ret, events) = self.run();
    match ret {
      Ok(out) => {
        pretty_assertions::assert_str_eq!(want, out.text);
        events
      }
      Err(e) => panic!("error: {e}"),
    }
  }

  /// Checks that the document is left as is.
  #[track_caller]
  pub(crate) fn check_same(&self) {
    let (ret, _) = self.run();
    match ret {
      Ok(out) => {
        pretty_assertions::assert_str_eq!(self.text, out.text);
        assert!(!out.changed, "changed");
      }
      Err(e) => panic!("error: {e}"),
    }
  }

  /// Checks that a pass fails with an error of the `want` kind, and returns the error.
  #[track_caller]
  pub(crate) fn check_err(&self, want: ErrorKind) -> Error {
    let (ret, _) = self.run();
    match ret {
      Ok(out) => panic!("no error, got:\n{}", out.text),
      Err(e) => {
        assert_eq!(Some(want), e.kind(), "{e}");
        e
      }
    }
  }
}

/// The messages of the warnings among `events`.
pub(crate) fn warnings(events: &[Event]) -> Vec<&str> {
  events.iter().filter(|e| e.severity == Severity::Warning).map(|e| e.message.as_str()).collect()
}

/// Puts `body` in a method `M` of a class `C`, indented under it. The method takes `params`.
pub(crate) fn method(params: &str, body: &str) -> String {
  let mut ret = format!("class C\n{{\n    void M({params})\n    {{\n");
  for line in body.lines() {
    if !line.is_empty() {
      ret.push_str("        ");
      ret.push_str(line);
    }
    ret.push('\n');
  }
  ret.push_str("    }\n}\n");
  ret
}
