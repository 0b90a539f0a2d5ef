use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::SyntaxKind as SK;

fn parse(s: &str) -> ast::Root {
  let lex = csharp_lex::get(s);
  assert!(lex.errors.is_empty(), "{:?}", lex.errors);
  let parse = crate::get(&lex.tokens);
  assert!(parse.errors.is_empty(), "{:?}", parse.errors);
  assert_eq!(parse.root.syntax().to_string(), s);
  parse.root
}

fn kinds_of(root: &ast::Root) -> Vec<SK> {
  root.syntax().descendants().map(|n| n.kind()).collect()
}

#[test]
fn class_with_members() {
  let root = parse(
    "using System;\nnamespace N\n{\n  public class C : B, I\n  {\n    private int x = 1, y;\n    \
     public C(int a) : base(a) { }\n    public string Name { get; set; } = \"\";\n    public int \
     this[int i] { get => i; set { } }\n    void M<T>(out T t) where T : new() { t = new T(); }\n  \
     }\n}\n",
  );
  let kinds = kinds_of(&root);
  for k in [
    SK::UsingDirective,
    SK::NamespaceDecl,
    SK::TypeDecl,
    SK::BaseList,
    SK::FieldDecl,
    SK::CtorDecl,
    SK::CtorInitializer,
    SK::PropertyDecl,
    SK::IndexerDecl,
    SK::Accessor,
    SK::MethodDecl,
    SK::TypeParamList,
  ] {
    assert!(kinds.contains(&k), "no {k:?}");
  }
}

#[test]
fn conditional_access_spine() {
  let root = parse("class C { void M() { var v = a?.B()?[0].C; } }");
  let kinds = kinds_of(&root);
  assert!(kinds.contains(&SK::ExprCondMember));
  assert!(kinds.contains(&SK::ExprCondIndex));
  let decl = root.syntax().descendants().find_map(ast::LocalDeclStmt::cast).unwrap();
  let init = decl.declarators().next().unwrap().expr().unwrap();
  assert!(matches!(init, ast::Expr::Member(_)));
  assert_eq!(init.syntax().to_string(), "a?.B()?[0].C");
}

#[test]
fn coalesce_is_right_assoc_and_below_or() {
  let root = parse("class C { void M() { x = a ?? b ?? c || d; } }");
  let assign = root.syntax().descendants().find_map(ast::ExprAssign::cast).unwrap();
  let ast::Expr::Binary(bin) = assign.rhs().unwrap() else { panic!("not binary") };
  assert_eq!(bin.op().unwrap().kind(), SK::QuestionQuestion);
  assert_eq!(bin.lhs().unwrap().syntax().to_string(), "a");
  assert_eq!(bin.rhs().unwrap().syntax().to_string(), "b ?? c || d");
}

#[test]
fn object_vs_collection_init() {
  let root = parse(
    "class C { void M() { var t = new T(1, 2) { F = 3, [k] = 4, G = { H = 5 }, L = { 1, 2 } }; \
     var l = new List<int> { 1, 2 }; } }",
  );
  let news: Vec<_> = root.syntax().descendants().filter_map(ast::ExprNew::cast).collect();
  assert_eq!(news.len(), 2);
  let obj = news[0].object_init().unwrap();
  let entries: Vec<_> = obj.entries().collect();
  assert_eq!(entries.len(), 4);
  assert!(matches!(entries[1], ast::InitEntry::Indexer(_)));
  assert!(news[1].collection_init().is_some());
}

#[test]
fn local_decl_vs_expr_stmt() {
  let root = parse(
    "class C { void M() { Foo<int> a = b; x.y = z; a < b; List<int>[] c; int? d = null; } }",
  );
  let stmts: Vec<SK> = root
    .syntax()
    .descendants()
    .find_map(ast::Block::cast)
    .unwrap()
    .stmts()
    .map(|s| s.syntax().kind())
    .collect();
  assert_eq!(
    stmts,
    [SK::LocalDeclStmt, SK::ExprStmt, SK::ExprStmt, SK::LocalDeclStmt, SK::LocalDeclStmt]
  );
}

#[test]
fn out_var_and_lambda_and_cast() {
  let root = parse(
    "class C { void M() { if (d.TryGetValue(k, out var v)) { f(x => x + 1, (a, b) => { }); } var \
     s = (string)o; var p = (a) + b; } }",
  );
  let kinds = kinds_of(&root);
  assert!(kinds.contains(&SK::DeclExpr));
  assert_eq!(kinds.iter().filter(|&&k| k == SK::ExprLambda).count(), 2);
  assert_eq!(kinds.iter().filter(|&&k| k == SK::ExprCast).count(), 1);
}

#[test]
fn node_ranges_exclude_leading_trivia() {
  let root = parse("class C {\n  void M() {\n    // hi\n    x = 1; // there\n  }\n}\n");
  let stmt = root.syntax().descendants().find_map(ast::ExprStmt::cast).unwrap();
  assert_eq!(stmt.syntax().to_string(), "x = 1;");
}

#[test]
fn fragment() {
  let lex = csharp_lex::get("int x = 1;\nif (x != null)\n{\n  x = 2;\n}\n");
  let frag = crate::fragment(&lex.tokens);
  assert!(frag.errors.is_empty());
  assert_eq!(frag.list.stmts().count(), 2);
}

#[test]
fn errors_are_reported() {
  let lex = csharp_lex::get("class C { void M() { x = ; } }");
  let parse = crate::get(&lex.tokens);
  assert_eq!(parse.errors.len(), 1);
  assert_eq!(parse.errors[0].to_string(), "expected an expression");
}

#[test]
fn unmatched_close_brace() {
  let text = "class C { }\n}\nclass D { }\n";
  let lex = csharp_lex::get(text);
  let parse = crate::get(&lex.tokens);
  let errors: Vec<_> = parse.errors.iter().map(ToString::to_string).collect();
  assert_eq!(errors, ["unmatched `}`"]);
  assert_eq!(u32::from(parse.errors[0].range().start()), 12);
  assert_eq!(parse.root.syntax().to_string(), text);
  assert_eq!(parse.root.items().count(), 2);
}

#[test]
fn unmatched_close_brace_in_fragment() {
  let lex = csharp_lex::get("x = 1;\n}\n");
  let frag = crate::fragment(&lex.tokens);
  assert_eq!(frag.errors.len(), 1);
  assert_eq!(frag.list.stmts().count(), 1);
}
