//! Rewriting `?.`, `?[` and `??`.

use crate::check::{Input, method, warnings};
use csharp_pipeline::ErrorKind;
use indoc::indoc;

#[test]
fn two_hops_into_local() {
  Input::new(&method("A a", "string v = a?.B()?.C();")).ty("a.B()", "T1").check(&method(
    "A a",
    indoc! {"
      string v = default(string);
      if (a != null)
      {
          T1 condExpression = a.B();
          if (condExpression != null)
          {
              v = condExpression.C();
          }
      }
    "},
  ));
}

#[test]
fn fallback() {
  Input::new(&method("A a", r#"string v = a?.B()?.C() ?? "x";"#))
    .ty("a.B()", "T1")
    .ty("a?.B()?.C()", "string")
    .check(&method(
      "A a",
      indoc! {r#"
        string v = default(string);
        if (a != null)
        {
            T1 condExpression = a.B();
            if (condExpression != null)
            {
                v = condExpression.C();
            }
        }
        if (v == null)
        {
            v = "x";
        }
      "#},
    ));
}

#[test]
fn fallback_missing_type() {
  Input::new(&method("A a", "int n = a?.Count ?? 5;")).check_err(ErrorKind::MissingTypeInfo);
}

#[test]
fn nullable_value_fallback() {
  Input::new(&method("A a", "var n = a?.Count ?? 5;"))
    .ty("a?.Count ?? 5", "int")
    .ty("a?.Count", "int?")
    .check(&method(
      "A a",
      indoc! {"
        int n = default(int);
        int? condExpression = default(int?);
        if (a != null)
        {
            condExpression = a.Count;
        }
        n = condExpression ?? 5;
      "},
    ));
}

#[test]
fn nullable_value_fallback_written_type() {
  Input::new(&method("A a", "int n = a?.Count ?? 0;")).ty("a?.Count", "int?").check(&method(
    "A a",
    indoc! {"
      int n = default(int);
      int? condExpression = default(int?);
      if (a != null)
      {
          condExpression = a.Count;
      }
      n = condExpression ?? 0;
    "},
  ));
}

#[test]
fn nullable_value_fallback_same_type() {
  Input::new(&method("A a, int? m", "int? n = a?.Count ?? m;")).ty("a?.Count", "int?").check(&method(
    "A a, int? m",
    indoc! {"
      int? n = default(int?);
      if (a != null)
      {
          n = a.Count;
      }
      if (n == null)
      {
          n = m;
      }
    "},
  ));
}

#[test]
fn nullable_value_receiver() {
  Input::new(&method("DateTime? d", "var y = d?.Year;"))
    .ty("d", "DateTime?")
    .ty("d?.Year", "int?")
    .check(&method(
      "DateTime? d",
      indoc! {"
        int? y = default(int?);
        if (d != null)
        {
            y = d.Value.Year;
        }
      "},
    ));
}

#[test]
fn nullable_value_part() {
  Input::new(&method("A a", "var n = a?.Find()?.Day;"))
    .ty("a.Find()", "System.Nullable<Date>")
    .ty("a?.Find()?.Day", "int?")
    .check(&method(
      "A a",
      indoc! {"
        int? n = default(int?);
        if (a != null)
        {
            System.Nullable<Date> condExpression = a.Find();
            if (condExpression != null)
            {
                n = condExpression.Value.Day;
            }
        }
      "},
    ));
}

#[test]
fn local_receiver() {
  Input::new(&method("", "A x = Make();\nx?.Run();")).check(&method(
    "",
    indoc! {"
      A x = Make();
      if (x != null)
      {
          x.Run();
      }
    "},
  ));
}

#[test]
fn property_named_like_lambda_parameter() {
  Input::new(&method("", "Func<Node, Node> f = Child => Child;\nvar n = Child?.Name;"))
    .ty("Child", "Node")
    .ty("Child?.Name", "string")
    .check(&method(
      "",
      indoc! {"
        Func<Node, Node> f = Child => Child;
        string n = default(string);
        Node condExpression = Child;
        if (condExpression != null)
        {
            n = condExpression.Name;
        }
      "},
    ));
}

#[test]
fn property_named_like_later_local() {
  Input::new(&method("bool ok", "Child?.Run();\nif (ok)\n{\n    Node Child = null;\n}"))
    .ty("Child", "Node")
    .check(&method(
      "bool ok",
      indoc! {"
        Node condExpression = Child;
        if (condExpression != null)
        {
            condExpression.Run();
        }
        if (ok)
        {
            Node Child = null;
        }
      "},
    ));
}

#[test]
fn discarded() {
  Input::new(&method("A a", "a?.B()?.DoIt();")).ty("a.B()", "T1").check(&method(
    "A a",
    indoc! {"
      if (a != null)
      {
          T1 condExpression = a.B();
          if (condExpression != null)
          {
              condExpression.DoIt();
          }
      }
    "},
  ));
}

#[test]
fn receiver_evaluated_once() {
  Input::new(&method("", "GetA()?.Run();")).ty("GetA()", "A").check(&method(
    "",
    indoc! {"
      A condExpression = GetA();
      if (condExpression != null)
      {
          condExpression.Run();
      }
    "},
  ));
}

#[test]
fn member_receiver() {
  Input::new(&method("", "this.a?.Run();")).ty("this.a", "A").check(&method(
    "",
    indoc! {"
      A condExpression = this.a;
      if (condExpression != null)
      {
          condExpression.Run();
      }
    "},
  ));
}

#[test]
fn element_access() {
  Input::new(&method("A a", "var n = a?[0];")).ty("a?[0]", "int?").check(&method(
    "A a",
    indoc! {"
      int? n = default(int?);
      if (a != null)
      {
          n = a[0];
      }
    "},
  ));
}

#[test]
fn ret() {
  Input::new(&method("A a", "return a?.Name;")).ty("a?.Name", "string").check(&method(
    "A a",
    indoc! {"
      string returnExpression = default(string);
      if (a != null)
      {
          returnExpression = a.Name;
      }
      return returnExpression;
    "},
  ));
}

#[test]
fn ret_declared_type() {
  Input::new(indoc! {"
    class C
    {
        string M(A a)
        {
            return a?.Name;
        }
    }
  "})
  .check(indoc! {"
    class C
    {
        string M(A a)
        {
            string returnExpression = default(string);
            if (a != null)
            {
                returnExpression = a.Name;
            }
            return returnExpression;
        }
    }
  "});
}

#[test]
fn argument() {
  Input::new(&method("A a", "Log(a?.Name);"))
    .ty("a?.Name", "string")
    .params("Log", &["message"])
    .check(&method(
      "A a",
      indoc! {"
        string message = default(string);
        if (a != null)
        {
            message = a.Name;
        }
        Log(message);
      "},
    ));
}

#[test]
fn argument_unknown_parameter() {
  Input::new(&method("A a", "Log(a?.Name);")).ty("a?.Name", "string").check(&method(
    "A a",
    indoc! {"
      string argValue = default(string);
      if (a != null)
      {
          argValue = a.Name;
      }
      Log(argValue);
    "},
  ));
}

#[test]
fn argument_named() {
  Input::new(&method("A a", "Log(text: a?.Name);")).ty("a?.Name", "string").check(&method(
    "A a",
    indoc! {"
      string text = default(string);
      if (a != null)
      {
          text = a.Name;
      }
      Log(text: text);
    "},
  ));
}

#[test]
fn argument_comment_in_parens() {
  Input::new(&method("A a", "Log((a?.Name /* why */));")).ty("a?.Name", "string").check(&method(
    "A a",
    indoc! {"
      string argValue = default(string);
      if (a != null)
      {
          argValue = a.Name;
      }
      Log(/* why */ argValue);
    "},
  ));
}

#[test]
fn chain_in_arguments_of_chain() {
  Input::new(&method("A a, B b", "a?.Send(b?.Name);"))
    .ty("b?.Name", "string")
    .params("a.Send", &["message"])
    .check(&method(
      "A a, B b",
      indoc! {"
        if (a != null)
        {
            string message = default(string);
            if (b != null)
            {
                message = b.Name;
            }
            a.Send(message);
        }
      "},
    ));
}

#[test]
fn assign_local() {
  Input::new(&method("A a", "string x;\nx = a?.Name;")).ty("a?.Name", "string").check(&method(
    "A a",
    indoc! {"
      string x;
      x = default(string);
      if (a != null)
      {
          x = a.Name;
      }
    "},
  ));
}

#[test]
fn assign_member() {
  Input::new(&method("A a", "this.name = a?.Name;")).ty("a?.Name", "string").check(&method(
    "A a",
    indoc! {"
      string assignValue = default(string);
      if (a != null)
      {
          assignValue = a.Name;
      }
      this.name = assignValue;
    "},
  ));
}

#[test]
fn assign_read_in_chain() {
  Input::new(&method("A x", "x = x?.Next;")).ty("x?.Next", "A").check(&method(
    "A x",
    indoc! {"
      A assignValue = default(A);
      if (x != null)
      {
          assignValue = x.Next;
      }
      x = assignValue;
    "},
  ));
}

#[test]
fn embedded_statement() {
  Input::new(&method("A a, bool ok, string x", "if (ok) x = a?.Name;")).ty("a?.Name", "string").check(
    &method(
      "A a, bool ok, string x",
      indoc! {"
        if (ok) {
            x = default(string);
            if (a != null)
            {
                x = a.Name;
            }
        }
      "},
    ),
  );
}

#[test]
fn same_line_braces() {
  Input::new(indoc! {"
    class C {
        void M(A a) {
            a?.B()?.Run();
        }
    }
  "})
  .ty("a.B()", "T1")
  .check(indoc! {"
    class C {
        void M(A a) {
            if (a != null) {
                T1 condExpression = a.B();
                if (condExpression != null) {
                    condExpression.Run();
                }
            }
        }
    }
  "});
}

#[test]
fn crlf() {
  let text = method("A a", "string v = a?.Name;").replace('\n', "\r\n");
  let want = method(
    "A a",
    indoc! {"
      string v = default(string);
      if (a != null)
      {
          v = a.Name;
      }
    "},
  )
  .replace('\n', "\r\n");
  Input::new(&text).check(&want);
}

#[test]
fn tabs() {
  let text = "class C\n{\n\tvoid M(A a)\n\t{\n\t\ta?.Run();\n\t}\n}\n";
  let want = "class C\n{\n\tvoid M(A a)\n\t{\n\t\tif (a != null)\n\t\t{\n\t\t\ta.Run();\n\t\t}\n\t}\n}\n";
  Input::new(text).check(want);
}

#[test]
fn fresh_names_avoid_locals() {
  Input::new(&method("", "int condExpression = 0;\nGetA()?.Run();")).ty("GetA()", "A").check(&method(
    "",
    indoc! {"
      int condExpression = 0;
      A condExpression2 = GetA();
      if (condExpression2 != null)
      {
          condExpression2.Run();
      }
    "},
  ));
}

#[test]
fn fresh_names_per_method() {
  Input::new(indoc! {"
    class C
    {
        void M()
        {
            GetA()?.Run();
            GetA()?.Stop();
        }

        void N()
        {
            GetA()?.Run();
        }
    }
  "})
  .ty("GetA()", "A")
  .check(indoc! {"
    class C
    {
        void M()
        {
            A condExpression = GetA();
            if (condExpression != null)
            {
                condExpression.Run();
            }
            A condExpression2 = GetA();
            if (condExpression2 != null)
            {
                condExpression2.Stop();
            }
        }

        void N()
        {
            A condExpression = GetA();
            if (condExpression != null)
            {
                condExpression.Run();
            }
        }
    }
  "});
}

#[test]
fn short_type_names() {
  Input::new(&method("", "GetA()?.Run();"))
    .ty("GetA()", "System.Text.StringBuilder")
    .config(|c| c.short_type_names = true)
    .check(&method(
      "",
      indoc! {"
        StringBuilder condExpression = GetA();
        if (condExpression != null)
        {
            condExpression.Run();
        }
      "},
    ));
}

#[test]
fn trailing_comment_dropped() {
  let events = Input::new(&method("A a", "string v = a?.Name; // note")).check(&method(
    "A a",
    indoc! {"
      string v = default(string);
      if (a != null)
      {
          v = a.Name;
      }
    "},
  ));
  assert_eq!(warnings(&events), ["dropped comment after split statement: // note"]);
  let at = events.iter().find_map(|e| e.at).expect("no location");
  assert_eq!((at.line, at.col), (5, 9));
}

#[test]
fn missing_type() {
  let e = Input::new(&method("A a", "var n = a?.Name;")).check_err(ErrorKind::MissingTypeInfo);
  assert_eq!(e.location().line, 5);
  assert_eq!(e.location().col, 17);
}

#[test]
fn missing_type_of_part() {
  Input::new(&method("A a", "a?.B()?.C();")).check_err(ErrorKind::MissingTypeInfo);
}

#[test]
fn chain_in_fallback() {
  Input::new(&method("A a, B b", "var y = a ?? (b?.C());"))
    .ty("b?.C()", "A")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn fallback_with_chain() {
  Input::new(&method("A a, A c", "var y = a?.B() ?? c?.B();"))
    .ty("a?.B()", "B")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn operand() {
  Input::new(&method("A a", "if (a?.Count > 0) { }"))
    .ty("a?.Count", "int?")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn compound_assign() {
  Input::new(&method("A a, int n", "n += a?.Count;"))
    .ty("a?.Count", "int?")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn many_declarators() {
  Input::new(&method("A a", "string p = a?.P, q = a?.Q;")).check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn effect_before_argument() {
  Input::new(&method("A a", "Log(F(), a?.Name);"))
    .ty("a?.Name", "string")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn argument_of_loop_condition() {
  Input::new(&method("A a", "while (Check(a?.Name)) { }"))
    .ty("a?.Name", "string")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn lambda_body() {
  Input::new(&method("A a", "Run(() => Log(a?.Name));"))
    .ty("a?.Name", "string")
    .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn nothing_to_do() {
  Input::new(&method("A a", "var n = a.Name ?? \"\";\nLog(a.B());")).check_same();
}
