//! Flattening object initializers.

use crate::check::{Input, method, warnings};
use csharp_pipeline::ErrorKind;
use indoc::indoc;

#[test]
fn nested() {
  Input::new(&method("", "T x = new T(1, 2) { F = 3, G = new U() { H = 4 } };")).check(&method(
    "",
    indoc! {"
      T x = new T(1, 2);
      x.F = 3;
      x.G = new U();
      x.G.H = 4;
    "},
  ));
}

#[test]
fn entries_and_comments() {
  Input::new(&method(
    "",
    indoc! {r#"
      var order = new Order
      {
          // the id
          Id = 7, // seven
          Lines = { 1, 2 },
          Totals = { [1] = 2 },
          Meta = new Meta { Tag = "t" },
          Data = new List<int> { 3 },
          // trailing
      };
    "#},
  ))
  .check(&method(
    "",
    indoc! {r#"
      var order = new Order();
      // the id
      order.Id = 7; // seven
      order.Lines.Add(1);
      order.Lines.Add(2);
      order.Totals[1] = 2;
      order.Meta = new Meta();
      order.Meta.Tag = "t";
      order.Data = new List<int> { 3 };
      // trailing
    "#},
  ));
}

#[test]
fn strip_comments() {
  Input::new(&method(
    "",
    indoc! {"
      var p = new Point
      {
          // x
          X = 1, // one
          Y = 2,
      };
    "},
  ))
  .config(|c| c.preserve_trivia = false)
  .check(&method(
    "",
    indoc! {"
      var p = new Point();
      p.X = 1;
      p.Y = 2;
    "},
  ));
}

#[test]
fn head_comment() {
  Input::new(&method(
    "",
    indoc! {"
      var p = new Point(0) // origin
      {
          X = 1,
      };
    "},
  ))
  .check(&method(
    "",
    indoc! {"
      var p = new Point(0); // origin
      p.X = 1;
    "},
  ));
}

#[test]
fn comment_after_empty_entry() {
  let events = Input::new(&method(
    "",
    indoc! {"
      var p = new Point
      {
          Tags = { }, // none
          X = 1,
      };
    "},
  ))
  .check(&method(
    "",
    indoc! {"
      var p = new Point();
      p.X = 1;
    "},
  ));
  assert_eq!(warnings(&events), ["dropped comment after entry that sets nothing: // none"]);
}

#[test]
fn dictionary() {
  Input::new(&method("", r#"var d = new Dictionary<string, int> { Count = 0, Items = { { "a", 1 } } };"#)).check(
    &method(
      "",
      indoc! {r#"
        var d = new Dictionary<string, int>();
        d.Count = 0;
        d.Items.Add("a", 1);
      "#},
    ),
  );
}

#[test]
fn bare() {
  Input::new(&method("", "new Widget { Size = 2 };")).check(&method(
    "",
    indoc! {"
      Widget initValue = new Widget();
      initValue.Size = 2;
    "},
  ));
}

#[test]
fn ret() {
  Input::new(&method("", "return new Point { X = 1 };")).check(&method(
    "",
    indoc! {"
      Point returnValue = new Point();
      returnValue.X = 1;
      return returnValue;
    "},
  ));
}

#[test]
fn argument() {
  Input::new(&method("", "Draw(new Point { X = 1 });")).params("Draw", &["point"]).check(&method(
    "",
    indoc! {"
      Point point = new Point();
      point.X = 1;
      Draw(point);
    "},
  ));
}

#[test]
fn collection_element() {
  Input::new(&method("", "var list = new List<Point> { new Point { X = 1 } };")).check(&method(
    "",
    indoc! {"
      Point initValue = new Point();
      initValue.X = 1;
      var list = new List<Point> { initValue };
    "},
  ));
}

#[test]
fn assign() {
  Input::new(&method("Widget w", "w = new Widget { Size = 2 };")).check(&method(
    "Widget w",
    indoc! {"
      w = new Widget();
      w.Size = 2;
    "},
  ));
}

#[test]
fn assign_read_in_entries() {
  Input::new(&method("Widget w", "w = new Widget { Parent = w };")).check(&method(
    "Widget w",
    indoc! {"
      Widget initValue = new Widget();
      initValue.Parent = w;
      w = initValue;
    "},
  ));
}

#[test]
fn after_chain() {
  Input::new(&method("A a", "var p = a?.Make(new Point { X = 1 });"))
    .ty("a?.Make(new Point { X = 1 })", "Point")
    .check(&method(
      "A a",
      indoc! {"
        Point p = default(Point);
        if (a != null)
        {
            Point initValue = new Point();
            initValue.X = 1;
            p = a.Make(initValue);
        }
      "},
    ));
}

#[test]
fn idempotent() {
  let first = Input::new(&method("", "var p = new Point { X = 1 };")).run().0.expect("first run");
  Input::new(&first.text).check_same();
}

#[test]
fn untouched() {
  Input::new(&method(
    "",
    indoc! {"
      var anon = new { A = 1 };
      var list = new List<int> { 1, 2 };
      Point p = new() { X = 1 };
      var arr = new int[] { 1 };
    "},
  ))
  .check_same();
}

#[test]
fn field() {
  Input::new(indoc! {"
    class C
    {
        private Widget w = new Widget { Size = 2 };
    }
  "})
  .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn many_trailing_comments() {
  Input::new(&method(
    "",
    indoc! {"
      var p = new Point
      {
          X = 1, /* a */ // b
      };
    "},
  ))
  .check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn effect_before_argument() {
  Input::new(&method("", "Draw(Next(), new Point { X = 1 });")).check_err(ErrorKind::UnsupportedConstruct);
}

#[test]
fn element_in_object_initializer() {
  Input::new(&method("", "var p = new Point { X = 1, Y = { 2 }, 3 };")).check_err(ErrorKind::UnsupportedConstruct);
}
