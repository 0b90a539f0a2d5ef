use crate::get;
use csharp_syntax::kind::SyntaxKind as SK;

fn kinds(s: &str) -> Vec<SK> {
  let lex = get(s);
  assert!(lex.errors.is_empty(), "{:?}", lex.errors);
  lex.tokens.iter().map(|t| t.kind).filter(|k| !k.is_trivia()).collect()
}

#[test]
fn lossless() {
  let s = "var x = a?.B()?[0] ?? @\"q\"\"\"; // hi\r\n/* block */ #region r\n";
  let lex = get(s);
  let joined: String = lex.tokens.iter().map(|t| t.text).collect();
  assert_eq!(joined, s);
}

#[test]
fn conditional_access() {
  assert_eq!(
    kinds("a?.b?[c]??d"),
    [
      SK::Id,
      SK::QuestionDot,
      SK::Id,
      SK::QuestionLSquare,
      SK::Id,
      SK::RSquare,
      SK::QuestionQuestion,
      SK::Id
    ]
  );
}

#[test]
fn generic_close_is_two_tokens() {
  assert_eq!(
    kinds("List<List<int>>"),
    [SK::Id, SK::Lt, SK::Id, SK::Lt, SK::Id, SK::Gt, SK::Gt]
  );
}

#[test]
fn line_comment_excludes_terminator() {
  let lex = get("// c\r\nx");
  assert_eq!(lex.tokens[0].kind, SK::LineComment);
  assert_eq!(lex.tokens[0].text, "// c");
  assert_eq!(lex.tokens[1].text, "\r\n");
}

#[test]
fn interpolated_string_is_opaque() {
  assert_eq!(kinds(r#"$"a{b["c"]}{{d}}" + 1"#), [SK::String, SK::Plus, SK::Number]);
}

#[test]
fn numbers() {
  assert_eq!(kinds("0x1F 1_000L 1.5e-3f .5m 1.ToString()").len(), 9);
}

#[test]
fn contextual_words() {
  assert_eq!(kinds("var value @class new"), [SK::Id, SK::Id, SK::Id, SK::NewKw]);
}

#[test]
fn unclosed() {
  let lex = get("\"abc\nx");
  assert_eq!(lex.errors.len(), 1);
  assert_eq!(lex.errors[0].to_string(), "unclosed string literal");
  let lex = get("/* abc");
  assert_eq!(lex.errors[0].to_string(), "unclosed comment");
}
