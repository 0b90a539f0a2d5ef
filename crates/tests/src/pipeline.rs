//! Running passes over whole documents.

use crate::check::{Input, method};
use csharp_pipeline::{Error, ErrorKind, Pass, Severity};
use indoc::indoc;

#[test]
fn disabled() {
  Input::new(&method("A a", "a?.Run();\nvar p = new Point { X = 1 };"))
    .config(|c| {
      c.optional_chain = false;
      c.initializer = false;
    })
    .check_same();
}

#[test]
fn lossless() {
  let text = indoc! {"
    using System;

    namespace N
    {
        // a class
        public sealed class C : B
        {
            private int x = 1, y;

            public string Name { get; set; } = \"\";

            /* ctor */
            public C(int a) : base(a) { }

            int M<T>(T t) where T : class
            {
                for (var i = 0; i < 3; i++) { x += i; }
                return x;
            }
        }
    }
  "};
  Input::new(text).check_same();
}

#[test]
fn only_initializer() {
  Input::new(&method("A a", "a?.Run();\nvar p = new Point { X = 1 };"))
    .config(|c| c.optional_chain = false)
    .check(&method(
      "A a",
      indoc! {"
        a?.Run();
        var p = new Point();
        p.X = 1;
      "},
    ));
}

#[test]
fn events() {
  let events = Input::new(&method("A a", "a?.Run();\na?.Stop();")).check(&method(
    "A a",
    indoc! {"
      if (a != null)
      {
          a.Run();
      }
      if (a != null)
      {
          a.Stop();
      }
    "},
  ));
  let got: Vec<_> = events.iter().map(|e| (e.severity, e.pass, e.message.as_str())).collect();
  assert_eq!(
    got,
    [
      (Severity::Info, Some(Pass::OptionalChain), "start"),
      (Severity::Info, Some(Pass::OptionalChain), "finish: 2 rewrites"),
      (Severity::Info, Some(Pass::Initializer), "start"),
      (Severity::Info, Some(Pass::Initializer), "finish: 0 rewrites"),
    ]
  );
}

#[test]
fn syntax_error() {
  let input = Input::new(&method("", "var x = ;"));
  let (ret, events) = input.run();
  let Err(e @ Error::Syntax { .. }) = ret else { panic!("not a syntax error: {ret:?}") };
  assert_eq!(e.location().line, 5);
  assert!(events.is_empty());
}

#[test]
fn no_partial_output() {
  let input = Input::new(&method("A a, B b", "a?.Run();\nvar n = b?.Name;"));
  let (ret, events) = input.run();
  let Err(e) = ret else { panic!("no error") };
  assert_eq!(e.kind(), Some(ErrorKind::MissingTypeInfo));
  assert!(matches!(e, Error::Pass { pass: Pass::OptionalChain, .. }));
  // the location is in the text before the first rewrite.
  assert_eq!((e.location().line, e.location().col), (6, 17));
  assert!(e.to_string().starts_with("6:17: optional-chain: missing type info for"), "{e}");
  assert!(events.iter().all(|e| e.pass == Some(Pass::OptionalChain)));
}

#[test]
fn default_literal_from_resolver() {
  struct Zero;

  impl csharp_ty::Resolver for Zero {
    fn static_type_of(&self, _: &str) -> Option<csharp_ty::TypeName> {
      Some(csharp_ty::TypeName::new("int"))
    }

    fn matched_parameter_name(&self, _: &str, _: usize) -> Option<String> {
      None
    }

    fn default_value_literal(&self, _: &csharp_ty::TypeName) -> String {
      "0".to_owned()
    }
  }

  let text = method("A a", "var n = a?.Count;");
  let mut sink = csharp_pipeline::VecSink::default();
  let out = csharp_pipeline::run(&text, &Zero, &csharp_pipeline::Config::default(), &mut sink).expect("run");
  pretty_assertions::assert_str_eq!(
    method(
      "A a",
      indoc! {"
        int n = 0;
        if (a != null)
        {
            n = a.Count;
        }
      "}
    ),
    out.text
  );
}
