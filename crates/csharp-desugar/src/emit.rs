//! Generated statements, and rendering them in the layout of the code around them.

/// A statement to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Stmt {
  /// A simple statement. Lines after the first keep their indentation relative to the first.
  Line(String),
  /// Source text to copy as is, even across lines.
  Verbatim(String),
  /// Comment lines. Empty lines stay empty.
  Comment(String),
  If { cond: String, body: Vec<Stmt> },
  Block(Vec<Stmt>),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Style<'a> {
  /// The indentation of the line the first statement goes on.
  pub(crate) indent: &'a str,
  pub(crate) step: &'a str,
  pub(crate) eol: &'a str,
  /// Whether `{` goes on its own line.
  pub(crate) allman: bool,
}

/// Renders `stmts` for insertion where the first statement's line is already indented. The text
/// does not end with a line terminator.
pub(crate) fn render(stmts: &[Stmt], style: Style<'_>) -> String {
  let mut lines = Vec::<(usize, String)>::new();
  push(&mut lines, stmts, 0, style.allman);
  let mut ret = String::new();
  for (idx, (depth, text)) in lines.iter().enumerate() {
    if idx != 0 {
      ret.push_str(style.eol);
    }
    if text.is_empty() {
      continue;
    }
    if idx != 0 {
      ret.push_str(style.indent);
    }
    for _ in 0..*depth {
      ret.push_str(style.step);
    }
    ret.push_str(text);
  }
  ret
}

fn push(lines: &mut Vec<(usize, String)>, stmts: &[Stmt], depth: usize, allman: bool) {
  for stmt in stmts {
    match stmt {
      Stmt::Line(s) | Stmt::Comment(s) => {
        lines.extend(s.split('\n').map(|l| (depth, l.trim_end_matches('\r').to_owned())));
      }
      Stmt::Verbatim(s) => lines.push((depth, s.clone())),
      Stmt::If { cond, body } => {
        if allman {
          lines.push((depth, format!("if ({cond})")));
          lines.push((depth, "{".to_owned()));
        } else {
          lines.push((depth, format!("if ({cond}) {{")));
        }
        push(lines, body, depth + 1, allman);
        lines.push((depth, "}".to_owned()));
      }
      Stmt::Block(body) => {
        lines.push((depth, "{".to_owned()));
        push(lines, body, depth + 1, allman);
        lines.push((depth, "}".to_owned()));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{Stmt, Style, render};

  fn style(allman: bool) -> Style<'static> {
    Style { indent: "  ", step: "  ", eol: "\n", allman }
  }

  fn nested() -> Vec<Stmt> {
    vec![
      Stmt::Line("T v = a.B();".to_owned()),
      Stmt::If { cond: "v != null".to_owned(), body: vec![Stmt::Line("v.C();".to_owned())] },
    ]
  }

  #[test]
  fn allman() {
    let got = render(&nested(), style(true));
    let want = "T v = a.B();\n  if (v != null)\n  {\n    v.C();\n  }";
    pretty_assertions::assert_eq!(want, got);
  }

  #[test]
  fn same_line() {
    let got = render(&nested(), style(false));
    let want = "T v = a.B();\n  if (v != null) {\n    v.C();\n  }";
    pretty_assertions::assert_eq!(want, got);
  }

  #[test]
  fn blank_and_continuation() {
    let stmts = vec![
      Stmt::Comment("// c\n".to_owned()),
      Stmt::Block(vec![Stmt::Line("x = f(\r\n  1);".to_owned())]),
    ];
    let got = render(&stmts, Style { eol: "\r\n", ..style(true) });
    let want = "// c\r\n\r\n  {\r\n    x = f(\r\n      1);\r\n  }";
    pretty_assertions::assert_eq!(want, got);
  }
}
