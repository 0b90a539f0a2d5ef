//! Rewritten chains behave like the originals: the same calls happen, and the same values end up in
//! the same variables, for every way the chain can hit a null.

use crate::check;
use crate::eval::{self, Val, World};
use csharp_pipeline::{Config, VecSink};
use csharp_ty::{Resolver, TypeName};

/// Every expression is a `Node`.
struct Nodes;

impl Resolver for Nodes {
  fn static_type_of(&self, _: &str) -> Option<TypeName> {
    Some(TypeName::new("Node"))
  }

  fn matched_parameter_name(&self, _: &str, _: usize) -> Option<String> {
    None
  }
}

/// A chain on `receiver` with `depth` conditional accesses, ending in a call of `Hit()`.
fn chain(receiver: &str, depth: usize) -> String {
  let mut ret = receiver.to_owned();
  for _ in 1..depth {
    ret.push_str("?.Next()");
  }
  ret.push_str("?.Hit()");
  ret
}

/// Objects `0` to `depth - 1` are reached one after another by the chain, and object `depth` is
/// `b`. Bit `k` of `nulls` makes the receiver of the `k`th conditional access null.
fn world(depth: usize, nulls: usize) -> World {
  let null_at = |k: usize| nulls & (1 << k) != 0;
  let mut next: Vec<_> = (0..depth).map(|k| if null_at(k + 1) { Val::Null } else { Val::Obj(k + 1) }).collect();
  next.push(Val::Null);
  let root = if null_at(0) { Val::Null } else { Val::Obj(0) };
  World { next, root, ..World::default() }
}

/// Checks the chain on `receiver`, one of the parameter `a`, the call `GetA()` and the property
/// `Root`, placed by `body`.
#[track_caller]
fn same_behavior(receiver: &str, body: impl Fn(&str) -> String) {
  for depth in 1..=5 {
    let text = check::method("Node a, Node b", &body(&chain(receiver, depth)));
    let out = csharp_pipeline::run(&text, &Nodes, &Config::default(), &mut VecSink::default());
    let out = out.unwrap_or_else(|e| panic!("{e}\n{text}"));
    assert!(out.changed);
    assert!(!out.text.contains("?."), "not rewritten:\n{}", out.text);
    for nulls in 0..(1usize << depth) {
      let mut before_world = world(depth, nulls);
      let mut after_world = world(depth, nulls);
      let args = [("a", before_world.root), ("b", Val::Obj(depth))];
      let before = eval::run(&text, "M", &mut before_world, &args);
      let after = eval::run(&out.text, "M", &mut after_world, &args);
      let at = format!("depth {depth}, nulls {nulls:b}\n{}", out.text);
      assert_eq!(before_world.hits, usize::from(nulls == 0), "{at}");
      assert_eq!(before_world.reads, usize::from(receiver != "a"), "{at}");
      assert_eq!(before_world.hits, after_world.hits, "{at}");
      assert_eq!(before_world.reads, after_world.reads, "{at}");
      assert_eq!(before_world.used, after_world.used, "{at}");
      assert_eq!(before.ret, after.ret, "{at}");
      for (name, val) in &before.env {
        assert_eq!(Some(val), after.env.get(name), "{name}: {at}");
      }
    }
  }
}

#[test]
fn discard() {
  same_behavior("a", |c| format!("{c};"));
}

#[test]
fn declare() {
  same_behavior("a", |c| format!("Node r = {c};"));
}

#[test]
fn declare_var() {
  same_behavior("a", |c| format!("var r = {c};"));
}

#[test]
fn declare_fallback() {
  same_behavior("a", |c| format!("Node r = {c} ?? b;"));
}

#[test]
fn assign() {
  same_behavior("a", |c| format!("Node r = null;\nr = {c};"));
}

#[test]
fn assign_fallback() {
  same_behavior("a", |c| format!("Node r = null;\nr = {c} ?? b;"));
}

#[test]
fn ret() {
  same_behavior("a", |c| format!("return {c};"));
}

#[test]
fn parenthesized() {
  same_behavior("a", |c| format!("Node r = ({c});"));
}

#[test]
fn argument() {
  same_behavior("a", |c| format!("Use({c});"));
}

#[test]
fn argument_fallback() {
  same_behavior("a", |c| format!("Use({c} ?? b);"));
}

#[test]
fn call_receiver() {
  same_behavior("GetA()", |c| format!("Node r = {c};"));
}

#[test]
fn call_receiver_argument() {
  same_behavior("GetA()", |c| format!("Use({c});"));
}

#[test]
fn property_receiver() {
  same_behavior("Root", |c| format!("{c};"));
}

#[test]
fn property_receiver_fallback() {
  same_behavior("Root", |c| format!("Node r = {c} ?? b;"));
}
