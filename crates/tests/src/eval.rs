//! A tiny evaluator for method bodies over mock objects.
//!
//! It knows just enough C# to run the chains these tests write and the code they are rewritten to:
//! declarations, assignments, `if`, `return`, calls of `Next()`, `Hit()`, `GetA()` and `Use(..)`,
//! reads of the `Root` property, `?.`, `??`, and comparisons against `null`.

use csharp_syntax::ast::{self, AstNode as _};
use csharp_syntax::kind::SyntaxKind as SK;
use rustc_hash::FxHashMap;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Val {
  #[default]
  Null,
  Obj(usize),
}

/// The mock objects. Object `i` returns `next[i]` from `Next()`. `Hit()` counts the call and returns
/// the object it was called on. `GetA()` and the property `Root` count the call or read and return
/// `root`. `Use(x)` records `x`.
#[derive(Debug, Default)]
pub(crate) struct World {
  pub(crate) next: Vec<Val>,
  pub(crate) root: Val,
  pub(crate) hits: usize,
  pub(crate) reads: usize,
  pub(crate) used: Vec<Val>,
}

/// The state after running a method.
#[derive(Debug)]
pub(crate) struct Done {
  pub(crate) env: FxHashMap<String, Val>,
  pub(crate) ret: Option<Val>,
}

/// Runs the body of the method `name` in `text` with the parameters bound to `args`.
pub(crate) fn run(text: &str, name: &str, world: &mut World, args: &[(&str, Val)]) -> Done {
  let lex = csharp_lex::get(text);
  assert!(lex.errors.is_empty(), "{:?}", lex.errors);
  let parse = csharp_parse::get(&lex.tokens);
  assert!(parse.errors.is_empty(), "{:?}", parse.errors);
  let method = parse
    .root
    .syntax()
    .descendants()
    .filter_map(ast::MethodDecl::cast)
    .find(|m| m.name().is_some_and(|t| t.text() == name))
    .expect("no such method");
  let body = method.body().expect("no body");
  let env = args.iter().map(|&(k, v)| (k.to_owned(), v)).collect();
  let mut st = St { world, env, ret: None };
  st.block(&body);
  Done { env: st.env, ret: st.ret }
}

struct St<'a> {
  world: &'a mut World,
  env: FxHashMap<String, Val>,
  ret: Option<Val>,
}

impl St<'_> {
  fn block(&mut self, block: &ast::Block) {
    for stmt in block.stmts() {
      if self.ret.is_some() {
        return;
      }
      self.stmt(&stmt);
    }
  }

  fn stmt(&mut self, stmt: &ast::Stmt) {
    match stmt {
      ast::Stmt::Block(b) => self.block(b),
      ast::Stmt::LocalDecl(decl) => {
        for d in decl.declarators() {
          let name = d.name().expect("no name").text().to_owned();
          let val = match d.init() {
            Some(ast::InitValue::Expr(e)) => self.expr(&e),
            Some(_) => panic!("initializer"),
            None => Val::Null,
          };
          self.env.insert(name, val);
        }
      }
      ast::Stmt::Expr(e) => {
        self.expr(&e.expr().expect("no expr"));
      }
      ast::Stmt::If(s) => {
        let cond = self.cond(&s.cond().expect("no cond"));
        if cond {
          self.stmt(&s.then_stmt().expect("no then"));
        } else if let Some(e) = s.else_clause() {
          self.stmt(&e.stmt().expect("no else"));
        }
      }
      ast::Stmt::Return(r) => {
        let val = r.expr().map_or(Val::Null, |e| self.expr(&e));
        self.ret = Some(val);
      }
      _ => panic!("unsupported statement: {}", stmt.syntax()),
    }
  }

  fn cond(&mut self, expr: &ast::Expr) -> bool {
    let ast::Expr::Binary(bin) = expr else { panic!("unsupported condition: {}", expr.syntax()) };
    let lhs = self.expr(&bin.lhs().expect("no lhs"));
    let rhs = self.expr(&bin.rhs().expect("no rhs"));
    match bin.op().expect("no op").kind() {
      SK::EqEq => lhs == rhs,
      SK::BangEq => lhs != rhs,
      k => panic!("unsupported comparison: {k:?}"),
    }
  }

  fn expr(&mut self, expr: &ast::Expr) -> Val {
    match expr {
      ast::Expr::Name(n) => {
        let name = n.name().expect("no name");
        match self.env.get(name.text()) {
          Some(&v) => v,
          None if name.text() == "Root" => {
            self.world.reads += 1;
            self.world.root
          }
          None => panic!("unbound: {}", name.text()),
        }
      }
      ast::Expr::Lit(lit) => {
        assert_eq!(lit.token().expect("no token").kind(), SK::NullKw, "only null literals");
        Val::Null
      }
      ast::Expr::Default(_) => Val::Null,
      ast::Expr::Paren(p) => self.expr(&p.expr().expect("no expr")),
      ast::Expr::Assign(a) => {
        let ast::Expr::Name(target) = a.lhs().expect("no lhs") else { panic!("unsupported target") };
        let val = self.expr(&a.rhs().expect("no rhs"));
        self.env.insert(target.name().expect("no name").text().to_owned(), val);
        val
      }
      ast::Expr::Binary(bin) if bin.op().is_some_and(|t| t.kind() == SK::QuestionQuestion) => {
        match self.expr(&bin.lhs().expect("no lhs")) {
          Val::Null => self.expr(&bin.rhs().expect("no rhs")),
          v => v,
        }
      }
      ast::Expr::Call(_) | ast::Expr::CondMember(_) | ast::Expr::Member(_) => {
        self.access(expr).unwrap_or(Val::Null)
      }
      _ => panic!("unsupported expression: {}", expr.syntax()),
    }
  }

  /// Evaluates part of a chain. `None` means a `?.` below short-circuited the rest of it.
  fn access(&mut self, expr: &ast::Expr) -> Option<Val> {
    let ast::Expr::Call(call) = expr else {
      return match expr {
        ast::Expr::Member(_) | ast::Expr::CondMember(_) => panic!("properties are not supported"),
        _ => Some(self.expr(expr)),
      };
    };
    let (receiver, name, conditional) = match call.callee().expect("no callee") {
      ast::Expr::Member(m) => (m.receiver(), m.name(), false),
      ast::Expr::CondMember(m) => (m.receiver(), m.name(), true),
      ast::Expr::Name(n) => return Some(self.call(&n, &call.arg_list().expect("no args"))),
      e => panic!("unsupported callee: {}", e.syntax()),
    };
    let recv = self.access(&receiver.expect("no receiver"))?;
    let id = match recv {
      Val::Obj(id) => id,
      Val::Null if conditional => return None,
      Val::Null => panic!("null dereference at {}", expr.syntax()),
    };
    match name.expect("no name").text() {
      "Next" => Some(self.world.next[id]),
      "Hit" => {
        self.world.hits += 1;
        Some(Val::Obj(id))
      }
      m => panic!("unknown method: {m}"),
    }
  }

  fn call(&mut self, callee: &ast::ExprName, args: &ast::ArgList) -> Val {
    let args: Vec<_> = args.args().map(|a| self.expr(&a.expr().expect("no expr"))).collect();
    match (callee.name().expect("no name").text(), args.as_slice()) {
      ("GetA", []) => {
        self.world.reads += 1;
        self.world.root
      }
      ("Use", &[v]) => {
        self.world.used.push(v);
        Val::Null
      }
      (f, _) => panic!("unknown function: {f}"),
    }
  }
}
